use crate::areas::repository::Repository;

impl Repository {
    /// Associate a remote name with a repository path on this filesystem
    pub fn add_remote(&self, name: &str, path: &str) -> anyhow::Result<()> {
        if !self.remotes().add(name, path)? {
            writeln!(self.writer(), "A remote with that name already exists.")?;
        }

        Ok(())
    }

    /// Drop a remote association
    pub fn rm_remote(&self, name: &str) -> anyhow::Result<()> {
        if !self.remotes().remove(name)? {
            writeln!(self.writer(), "A remote with that name does not exist.")?;
        }

        Ok(())
    }
}
