use crate::areas::repository::Repository;

impl Repository {
    /// Display the fingerprints of all commits carrying the given
    /// message, one per line, in lexicographic order
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for commit_id in self.database().list_commit_ids()? {
            let commit = self.commit_by_id(&commit_id)?;
            if commit.message() == message {
                writeln!(self.writer(), "{commit_id}")?;
                found = true;
            }
        }

        if !found {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }

        Ok(())
    }
}
