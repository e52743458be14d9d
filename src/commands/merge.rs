use crate::areas::repository::Repository;
use crate::artifacts::merge::conflict::conflict_bytes;
use crate::artifacts::merge::split_point::{SplitOutcome, SplitPointFinder};
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::UNTRACKED_FILE_IN_THE_WAY;

impl Repository {
    /// Merge the given branch into the current branch
    ///
    /// Preconditions, checked in order: clean stage, no untracked file
    /// in the way, the branch exists, the branch is not the current one.
    /// The split point decides between a silent no-op, an ancestor
    /// notice, a fast-forward, and a real three-way merge.
    pub fn merge(&self, branch: &str) -> anyhow::Result<()> {
        if !self.stage().is_empty()? {
            writeln!(self.writer(), "You have uncommitted changes.")?;
            return Ok(());
        }
        if self.untracked_in_the_way(false)? {
            writeln!(self.writer(), "{UNTRACKED_FILE_IN_THE_WAY}")?;
            return Ok(());
        }
        let given_head = match self.refs().head_of(branch)? {
            Some(given_head) => given_head,
            None => {
                writeln!(self.writer(), "A branch with that name does not exist.")?;
                return Ok(());
            }
        };
        let current = self.refs().current_branch()?;
        if branch == current {
            writeln!(self.writer(), "Cannot merge a branch with itself.")?;
            return Ok(());
        }

        let current_head = self.head_id()?;
        let finder = SplitPointFinder::new(|commit_id: &ObjectId| self.commit_links(commit_id));

        match finder.find(&current_head, &given_head)? {
            SplitOutcome::SameHead => Ok(()),
            SplitOutcome::GivenIsAncestor => {
                writeln!(
                    self.writer(),
                    "Given branch is an ancestor of the current branch."
                )?;
                Ok(())
            }
            SplitOutcome::FastForward => {
                let tree = self.commit_by_id(&given_head)?.tree().clone();
                self.refs().set_head(&current, &given_head)?;
                self.restore_working_tree(&tree)?;
                self.stage().clear()?;
                writeln!(self.writer(), "Current branch fast-forwarded.")?;
                Ok(())
            }
            SplitOutcome::Split(split_id) => {
                self.merge_trees(branch, &current, &current_head, &given_head, &split_id)
            }
        }
    }

    /// Apply the three-way merge rules file by file, then create the
    /// merge commit
    fn merge_trees(
        &self,
        given_branch: &str,
        current_branch: &str,
        current_head: &ObjectId,
        given_head: &ObjectId,
        split_id: &ObjectId,
    ) -> anyhow::Result<()> {
        let split_tree = self.commit_by_id(split_id)?.tree().clone();
        let mut current_rest = self.commit_by_id(current_head)?.tree().clone();
        let mut given_rest = self.commit_by_id(given_head)?.tree().clone();
        let mut conflict = false;

        // Files known to the split point. Entries are drained from the
        // side trees so only files new on a side remain afterwards.
        for (filename, split_blob) in &split_tree {
            let current_blob = current_rest.remove(filename);
            let given_blob = given_rest.remove(filename);

            match (current_blob, given_blob) {
                // unchanged on both sides
                (Some(current), Some(given)) if current == *split_blob && given == *split_blob => {}
                // changed only in the given branch: take its version
                (Some(current), Some(given)) if current == *split_blob => {
                    self.take_given_version(filename, &given)?;
                }
                // changed only in the current branch
                (Some(_), Some(given)) if given == *split_blob => {}
                // changed identically on both sides
                (Some(current), Some(given)) if current == given => {}
                // changed differently on both sides
                (Some(current), Some(given)) => {
                    self.write_conflict(filename, Some(&current), Some(&given))?;
                    conflict = true;
                }
                // deleted in the given branch, unchanged here: remove
                (Some(current), None) if current == *split_blob => {
                    self.stage().stage_removal(filename)?;
                    self.workspace().remove_file(filename);
                }
                // deleted in the given branch, changed here
                (Some(current), None) => {
                    self.write_conflict(filename, Some(&current), None)?;
                    conflict = true;
                }
                // deleted here, unchanged in the given branch
                (None, Some(given)) if given == *split_blob => {}
                // deleted here, changed in the given branch
                (None, Some(given)) => {
                    self.write_conflict(filename, None, Some(&given))?;
                    conflict = true;
                }
                // deleted on both sides
                (None, None) => {}
            }
        }

        // Files created since the split on the current side; a file also
        // created on the given side conflicts unless the contents agree.
        for (filename, current_blob) in &current_rest {
            if let Some(given_blob) = given_rest.remove(filename)
                && *current_blob != given_blob
            {
                self.write_conflict(filename, Some(current_blob), Some(&given_blob))?;
                conflict = true;
            }
        }

        // Files created only on the given side: take them.
        for (filename, given_blob) in &given_rest {
            self.take_given_version(filename, given_blob)?;
        }

        if conflict {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        // A merge always commits, even when the merged tree ends up
        // identical to the current head's.
        self.write_commit(
            &format!("Merged {given_branch} into {current_branch}."),
            Some(given_head.clone()),
        )
    }

    /// Copy the given branch's blob into the working tree and stage it
    fn take_given_version(&self, filename: &str, blob_id: &ObjectId) -> anyhow::Result<()> {
        let blob = self.database().get_blob(blob_id)?;
        self.workspace().write_file(filename, blob.data())?;
        self.stage().stage_addition(filename, blob.data())
    }

    /// Write the conflicted content for a contested file and stage it
    fn write_conflict(
        &self,
        filename: &str,
        current_blob: Option<&ObjectId>,
        given_blob: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let current = current_blob
            .map(|blob_id| self.database().get_blob(blob_id))
            .transpose()?;
        let given = given_blob
            .map(|blob_id| self.database().get_blob(blob_id))
            .transpose()?;

        let merged = conflict_bytes(
            current.as_ref().map(|blob| blob.data().as_ref()),
            given.as_ref().map(|blob| blob.data().as_ref()),
        );
        self.workspace().write_file(filename, &merged)?;
        self.stage().stage_addition(filename, &merged)
    }
}
