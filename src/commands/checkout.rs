use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::UNTRACKED_FILE_IN_THE_WAY;
use std::collections::BTreeMap;

impl Repository {
    /// `checkout -- <file>`: restore a file from the current head
    pub fn checkout_file(&self, filename: &str) -> anyhow::Result<()> {
        let head_id = self.head_id()?;
        self.restore_file_from(&head_id, filename)
    }

    /// `checkout <commit> -- <file>`: restore a file from a commit,
    /// addressed by full fingerprint or 8-hex prefix
    pub fn checkout_file_at(&self, raw_commit_id: &str, filename: &str) -> anyhow::Result<()> {
        match self.resolve_commit_id(raw_commit_id)? {
            Some(commit_id) => self.restore_file_from(&commit_id, filename),
            None => {
                writeln!(self.writer(), "No commit with that id exists.")?;
                Ok(())
            }
        }
    }

    /// `checkout <branch>`: replace the working tree with the branch
    /// head's tree and make it the current branch
    pub fn checkout_branch(&self, branch: &str) -> anyhow::Result<()> {
        let target = match self.refs().head_of(branch)? {
            Some(target) => target,
            None => {
                writeln!(self.writer(), "No such branch exists.")?;
                return Ok(());
            }
        };

        if self.untracked_in_the_way(false)? {
            writeln!(self.writer(), "{UNTRACKED_FILE_IN_THE_WAY}")?;
            return Ok(());
        }

        let tree = self.commit_by_id(&target)?.tree().clone();
        self.restore_working_tree(&tree)?;

        if branch == self.refs().current_branch()? {
            writeln!(self.writer(), "No need to checkout the current branch")?;
            return Ok(());
        }

        self.refs().set_current(branch)?;
        self.stage().clear()
    }

    fn restore_file_from(&self, commit_id: &ObjectId, filename: &str) -> anyhow::Result<()> {
        let commit = self.commit_by_id(commit_id)?;

        match commit.tracked(filename) {
            Some(blob_id) => {
                let blob = self.database().get_blob(blob_id)?;
                self.workspace().write_file(filename, blob.data())
            }
            None => {
                writeln!(self.writer(), "File does not exist in that commit.")?;
                Ok(())
            }
        }
    }

    /// Whether any working-directory file would be clobbered: present
    /// in the working tree but unknown to the current head commit.
    /// `tolerate_staged` additionally accepts files staged for addition
    /// (reset's guard does, checkout's and merge's do not).
    pub(crate) fn untracked_in_the_way(&self, tolerate_staged: bool) -> anyhow::Result<bool> {
        let head_tree = self.head_commit()?.tree().clone();

        for filename in self.workspace().list_files()? {
            if head_tree.contains_key(&filename) {
                continue;
            }
            if tolerate_staged && self.stage().contains_addition(&filename) {
                continue;
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Replace the working directory with a commit tree: delete every
    /// top-level file (best effort), then write every tracked file
    pub(crate) fn restore_working_tree(
        &self,
        tree: &BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<()> {
        for filename in self.workspace().list_files()? {
            self.workspace().remove_file(&filename);
        }
        for (filename, blob_id) in tree {
            let blob = self.database().get_blob(blob_id)?;
            self.workspace().write_file(filename, blob.data())?;
        }

        Ok(())
    }
}
