use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::commands::DEFAULT_BRANCH;
use anyhow::Context;
use std::collections::BTreeMap;

impl Repository {
    /// Initialize a repository: directory layout, initial commit, and
    /// the `master` branch pointing at it
    pub fn init(&self) -> anyhow::Result<()> {
        let gitlet_dir = self.gitlet_dir();
        if gitlet_dir.exists() {
            writeln!(
                self.writer(),
                "A Gitlet version-control system already exists in the current directory."
            )?;
            return Ok(());
        }

        std::fs::create_dir(&gitlet_dir).context(format!(
            "Unable to create repository directory {}",
            gitlet_dir.display()
        ))?;
        std::fs::create_dir(self.stage_dir())?;
        std::fs::create_dir(self.database().blobs_path())?;
        std::fs::create_dir(self.database().commits_path())?;

        let initial = Commit::initial();
        let commit_id = self.database().put_commit(&initial)?;
        self.refs().record_short(&commit_id)?;
        self.refs()
            .write_head_map(&BTreeMap::from([(DEFAULT_BRANCH.to_string(), commit_id.clone())]))?;
        self.refs().set_current(DEFAULT_BRANCH)?;
        self.cache_commit(commit_id, initial);

        Ok(())
    }
}
