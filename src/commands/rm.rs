use crate::areas::repository::Repository;

impl Repository {
    /// Unstage a pending addition, or stage a tracked file for removal
    /// and delete it from the working directory
    pub fn rm(&self, filename: &str) -> anyhow::Result<()> {
        if self.stage().unstage_addition(filename)? {
            return Ok(());
        }

        if self.head_commit()?.tracked(filename).is_some() {
            self.stage().stage_removal(filename)?;
            self.workspace().remove_file(filename);
            return Ok(());
        }

        writeln!(self.writer(), "No reason to remove the file.")?;
        Ok(())
    }
}
