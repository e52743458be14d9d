use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::{GITLET_DIR, Repository};
use crate::areas::workspace::Workspace;
use anyhow::Context;
use std::collections::HashSet;

impl Repository {
    /// Append the current branch's history to a remote branch and
    /// fast-forward the remote to the local head
    ///
    /// The remote branch head must be an ancestor of the local head;
    /// a remote branch that does not exist yet is created.
    pub fn push(&self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        if !self.stage().is_empty()? {
            writeln!(self.writer(), "You have uncommitted changes.")?;
            return Ok(());
        }

        let remote_root = match self.remotes().resolve(remote_name)? {
            Some(remote_root) if remote_root.join(GITLET_DIR).is_dir() => remote_root,
            _ => {
                writeln!(self.writer(), "Remote directory not found.")?;
                return Ok(());
            }
        };

        let remote_gitlet = remote_root.join(GITLET_DIR);
        let remote_refs = Refs::new(remote_gitlet.clone().into_boxed_path());
        let remote_database = Database::new(remote_gitlet.into_boxed_path());

        let local_head = self.head_id()?;

        // Commits to ship: everything between the local head and the
        // remote branch head, or the whole history for a new branch.
        let targets = match remote_refs.head_of(branch)? {
            Some(remote_head) if remote_head == local_head => {
                writeln!(self.writer(), "Remote is already up-to-date. No need to push.")?;
                return Ok(());
            }
            Some(remote_head) => {
                let mut reached = HashSet::new();
                let mut stack = vec![local_head.clone()];
                while let Some(commit_id) = stack.pop() {
                    if !reached.insert(commit_id.clone()) || commit_id == remote_head {
                        continue;
                    }
                    for parent in self.commit_links(&commit_id).parents {
                        stack.push(parent);
                    }
                }

                if !reached.remove(&remote_head) {
                    writeln!(self.writer(), "Please pull down remote changes before pushing.")?;
                    return Ok(());
                }
                reached.into_iter().collect::<Vec<_>>()
            }
            None => self.database().list_commit_ids()?,
        };

        for commit_id in &targets {
            if !remote_database.contains_commit(commit_id) {
                std::fs::copy(
                    self.database().commit_path(commit_id),
                    remote_database.commit_path(commit_id),
                )
                .context(format!("Unable to copy commit {commit_id} to the remote"))?;
            }
        }
        for blob_id in self.database().list_blob_ids()? {
            if !remote_database.contains_blob(&blob_id) {
                std::fs::copy(
                    self.database().blob_path(&blob_id),
                    remote_database.blob_path(&blob_id),
                )
                .context(format!("Unable to copy blob {blob_id} to the remote"))?;
            }
        }

        remote_refs.set_head(branch, &local_head)?;

        // Bring the remote working directory up to the pushed head.
        let remote_workspace = Workspace::new(remote_root.into_boxed_path());
        for (filename, blob_id) in self.head_commit()?.tree() {
            let blob = remote_database.get_blob(blob_id)?;
            remote_workspace.write_file(filename, blob.data())?;
        }

        Ok(())
    }
}
