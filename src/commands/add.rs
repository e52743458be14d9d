use crate::areas::repository::Repository;

impl Repository {
    /// Stage a working-tree file for addition
    ///
    /// When the working-tree content matches the version tracked by the
    /// current commit, the add cancels instead: any pending addition or
    /// removal for the filename is dropped.
    pub fn add(&self, filename: &str) -> anyhow::Result<()> {
        if !self.workspace().file_exists(filename) {
            writeln!(self.writer(), "File does not exist.")?;
            return Ok(());
        }

        let blob = self.workspace().parse_blob(filename)?;

        if self.head_commit()?.tracked(filename) == Some(&blob.fingerprint()) {
            self.stage().unstage_addition(filename)?;
            self.stage().drop_removal(filename)?;
            return Ok(());
        }

        self.stage().stage_addition(filename, blob.data())
    }
}
