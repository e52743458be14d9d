use crate::areas::repository::Repository;

impl Repository {
    /// Create a branch pointing at the current head, without switching
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        if self.refs().head_of(name)?.is_some() {
            writeln!(self.writer(), "A branch with that name already exists.")?;
            return Ok(());
        }

        let head_id = self.head_id()?;
        self.refs().set_head(name, &head_id)
    }

    /// Delete a branch pointer; its commits and blobs stay in the store
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        if name == self.refs().current_branch()? {
            writeln!(self.writer(), "Cannot remove the current branch.")?;
            return Ok(());
        }

        let mut head_map = self.refs().head_map()?;
        if head_map.remove(name).is_none() {
            writeln!(self.writer(), "A branch with that name does not exist.")?;
            return Ok(());
        }

        self.refs().write_head_map(&head_map)
    }
}
