use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::{GITLET_DIR, Repository};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::HashSet;

impl Repository {
    /// Copy a remote branch's history into this repository and point
    /// the mirror branch `<remote>/<branch>` at its head
    pub fn fetch(&self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        self.fetch_branch(remote_name, branch)?;
        Ok(())
    }

    /// Fetch, then merge the mirror branch into the current branch
    pub fn pull(&self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        if self.fetch_branch(remote_name, branch)?.is_none() {
            return Ok(());
        }

        self.merge(&format!("{remote_name}/{branch}"))
    }

    /// Shared fetch body
    ///
    /// # Returns
    ///
    /// The fetched head, or None when a user error was reported (pull
    /// must not continue past a failed fetch)
    fn fetch_branch(
        &self,
        remote_name: &str,
        branch: &str,
    ) -> anyhow::Result<Option<ObjectId>> {
        let remote_root = match self.remotes().resolve(remote_name)? {
            Some(remote_root) if remote_root.join(GITLET_DIR).is_dir() => remote_root,
            _ => {
                writeln!(self.writer(), "Remote directory not found.")?;
                return Ok(None);
            }
        };

        let remote_gitlet = remote_root.join(GITLET_DIR);
        let remote_refs = Refs::new(remote_gitlet.clone().into_boxed_path());
        let remote_database = Database::new(remote_gitlet.into_boxed_path());

        let remote_head = match remote_refs.head_of(branch)? {
            Some(remote_head) => remote_head,
            None => {
                writeln!(self.writer(), "That remote does not have that branch.")?;
                return Ok(None);
            }
        };

        // Walk the remote history, copying records until hitting commits
        // already present locally.
        let mut visited = HashSet::new();
        let mut stack = vec![remote_head.clone()];
        while let Some(commit_id) = stack.pop() {
            if !visited.insert(commit_id.clone()) || self.database().contains_commit(&commit_id) {
                continue;
            }

            std::fs::copy(
                remote_database.commit_path(&commit_id),
                self.database().commit_path(&commit_id),
            )
            .context(format!("Unable to copy commit {commit_id} from the remote"))?;

            let commit = remote_database.get_commit(&commit_id)?;
            for parent in commit.parents() {
                stack.push(parent.clone());
            }
        }

        for blob_id in remote_database.list_blob_ids()? {
            if !self.database().contains_blob(&blob_id) {
                std::fs::copy(
                    remote_database.blob_path(&blob_id),
                    self.database().blob_path(&blob_id),
                )
                .context(format!("Unable to copy blob {blob_id} from the remote"))?;
            }
        }

        let mirror = format!("{remote_name}/{branch}");
        self.refs().set_head(&mirror, &remote_head)?;

        Ok(Some(remote_head))
    }
}
