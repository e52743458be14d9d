use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Materialize the staged state into a new commit on the current branch
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        if self.stage().is_empty()? {
            writeln!(self.writer(), "No changes added to the commit.")?;
            return Ok(());
        }
        if message.is_empty() {
            writeln!(self.writer(), "Please enter a commit message.")?;
            return Ok(());
        }

        self.write_commit(message, None)
    }

    /// Build and persist a commit from the current head plus the stage
    ///
    /// The tree starts from the head's tree; pending removals delete
    /// entries, pending additions store their bytes as blobs and insert
    /// the fingerprints. The branch pointer advances only after the
    /// commit record is durably written; the stage is cleared last.
    ///
    /// `commit` gates this on a non-empty stage and message; a merge
    /// writes its commit unconditionally, even when the merged tree
    /// matches the current head's.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        let head_id = self.head_id()?;
        let mut tree = self.head_commit()?.tree().clone();

        for filename in self.stage().removals()? {
            tree.remove(&filename);
        }
        for (filename, data) in self.stage().additions()? {
            let blob_id = self.database().put_blob(&Blob::new(data))?;
            tree.insert(filename, blob_id);
        }

        let timestamp = chrono::Local::now().fixed_offset();
        let commit = Commit::new(
            message.to_string(),
            timestamp,
            tree,
            Some(head_id),
            second_parent,
        );

        let commit_id = self.database().put_commit(&commit)?;
        self.refs().record_short(&commit_id)?;

        let current = self.refs().current_branch()?;
        self.refs().set_head(&current, &commit_id)?;
        self.cache_commit(commit_id, commit);
        self.stage().clear()?;

        Ok(())
    }
}
