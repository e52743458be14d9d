use crate::areas::repository::Repository;
use crate::commands::UNTRACKED_FILE_IN_THE_WAY;

impl Repository {
    /// Check out all files of a commit, move the current branch's head
    /// to it, and clear the stage
    ///
    /// The target is resolved before anything is touched, so an unknown
    /// id changes no state.
    pub fn reset(&self, raw_commit_id: &str) -> anyhow::Result<()> {
        let target = match self.resolve_commit_id(raw_commit_id)? {
            Some(target) => target,
            None => {
                writeln!(self.writer(), "No commit with that id exists.")?;
                return Ok(());
            }
        };

        if self.untracked_in_the_way(true)? {
            writeln!(self.writer(), "{UNTRACKED_FILE_IN_THE_WAY}")?;
            return Ok(());
        }

        let tree = self.commit_by_id(&target)?.tree().clone();
        self.restore_working_tree(&tree)?;

        let current = self.refs().current_branch()?;
        self.refs().set_head(&current, &target)?;
        self.stage().clear()
    }
}
