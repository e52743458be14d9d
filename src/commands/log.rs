use crate::areas::repository::Repository;

impl Repository {
    /// Display the history of the current head down to the initial
    /// commit, following first parents only
    pub fn log(&self) -> anyhow::Result<()> {
        let mut cursor = Some(self.head_id()?);

        while let Some(commit_id) = cursor {
            let commit = self.commit_by_id(&commit_id)?;
            commit.display(&commit_id, &mut *self.writer())?;
            cursor = commit.parent().cloned();
        }

        Ok(())
    }

    /// Display every commit in the repository, in lexicographic order
    /// of their fingerprints
    pub fn global_log(&self) -> anyhow::Result<()> {
        for commit_id in self.database().list_commit_ids()? {
            let commit = self.commit_by_id(&commit_id)?;
            commit.display(&commit_id, &mut *self.writer())?;
        }

        Ok(())
    }
}
