//! Staging area
//!
//! A transient set of pending additions and removals used to build the
//! next commit, backed by the `.gitlet/stage/` directory:
//!
//! - An addition is a plain file holding the staged bytes, named after
//!   the file it stages.
//! - A removal is an empty marker file named `[[del[[<filename>`; its
//!   contents are ignored.
//!
//! Additions and removals stay disjoint: staging an addition clears any
//! pending removal marker for the same filename.

use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Filename prefix marking an entry as staged for removal
const REMOVAL_MARKER_PREFIX: &str = "[[del[[";

/// Staging area backed by the stage directory
#[derive(Debug, new)]
pub struct Stage {
    /// Path to the stage directory
    path: Box<Path>,
}

impl Stage {
    fn addition_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }

    fn removal_path(&self, filename: &str) -> PathBuf {
        self.path.join(format!("{REMOVAL_MARKER_PREFIX}{filename}"))
    }

    /// Stage a file's bytes for addition, dropping any pending removal
    pub fn stage_addition(&self, filename: &str, data: &Bytes) -> anyhow::Result<()> {
        self.drop_removal(filename)?;

        let path = self.addition_path(filename);
        std::fs::write(&path, data)
            .context(format!("Unable to stage addition {}", path.display()))
    }

    /// Drop a pending addition
    ///
    /// # Returns
    ///
    /// true if an addition was pending for the filename
    pub fn unstage_addition(&self, filename: &str) -> anyhow::Result<bool> {
        let path = self.addition_path(filename);
        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path)
            .context(format!("Unable to unstage addition {}", path.display()))?;
        Ok(true)
    }

    /// Mark a filename for removal from the next commit
    pub fn stage_removal(&self, filename: &str) -> anyhow::Result<()> {
        let path = self.removal_path(filename);

        std::fs::write(&path, [])
            .context(format!("Unable to stage removal {}", path.display()))
    }

    /// Drop a pending removal marker
    pub fn drop_removal(&self, filename: &str) -> anyhow::Result<bool> {
        let path = self.removal_path(filename);
        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path)
            .context(format!("Unable to drop removal marker {}", path.display()))?;
        Ok(true)
    }

    pub fn contains_addition(&self, filename: &str) -> bool {
        self.addition_path(filename).exists()
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.list()?.is_empty())
    }

    /// Pending additions: filename -> staged bytes, in filename order
    pub fn additions(&self) -> anyhow::Result<BTreeMap<String, Bytes>> {
        self.list()?
            .into_iter()
            .filter(|name| !name.starts_with(REMOVAL_MARKER_PREFIX))
            .map(|name| {
                let data = std::fs::read(self.addition_path(&name))
                    .context(format!("Unable to read staged addition {name}"))?;
                Ok((name, Bytes::from(data)))
            })
            .collect()
    }

    /// Pending removals, in filename order
    pub fn removals(&self) -> anyhow::Result<BTreeSet<String>> {
        Ok(self
            .list()?
            .into_iter()
            .filter_map(|name| {
                name.strip_prefix(REMOVAL_MARKER_PREFIX)
                    .map(str::to_string)
            })
            .collect())
    }

    /// Empty both sets
    pub fn clear(&self) -> anyhow::Result<()> {
        for name in self.list()? {
            let path = self.path.join(&name);
            std::fs::remove_file(&path)
                .context(format!("Unable to clear stage entry {}", path.display()))?;
        }

        Ok(())
    }

    fn list(&self) -> anyhow::Result<Vec<String>> {
        let mut names = std::fs::read_dir(self.path.as_ref())
            .context(format!(
                "Unable to read stage directory {}",
                self.path.display()
            ))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stage_in_temp_dir() -> (assert_fs::TempDir, Stage) {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
        let stage = Stage::new(dir.path().to_path_buf().into_boxed_path());

        (dir, stage)
    }

    #[test]
    fn starts_empty() {
        let (_dir, stage) = stage_in_temp_dir();
        assert!(stage.is_empty().unwrap());
    }

    #[test]
    fn staged_additions_round_trip() {
        let (_dir, stage) = stage_in_temp_dir();
        stage
            .stage_addition("a.txt", &Bytes::from_static(b"alpha"))
            .unwrap();

        let additions = stage.additions().unwrap();
        assert_eq!(additions.get("a.txt"), Some(&Bytes::from_static(b"alpha")));
        assert!(!stage.is_empty().unwrap());
    }

    #[test]
    fn staging_an_addition_overwrites_the_previous_one() {
        let (_dir, stage) = stage_in_temp_dir();
        stage
            .stage_addition("a.txt", &Bytes::from_static(b"old"))
            .unwrap();
        stage
            .stage_addition("a.txt", &Bytes::from_static(b"new"))
            .unwrap();

        let additions = stage.additions().unwrap();
        assert_eq!(additions.get("a.txt"), Some(&Bytes::from_static(b"new")));
        assert_eq!(additions.len(), 1);
    }

    #[test]
    fn staging_an_addition_drops_a_pending_removal() {
        let (_dir, stage) = stage_in_temp_dir();
        stage.stage_removal("a.txt").unwrap();
        stage
            .stage_addition("a.txt", &Bytes::from_static(b"back"))
            .unwrap();

        assert!(stage.removals().unwrap().is_empty());
        assert!(stage.contains_addition("a.txt"));
    }

    #[test]
    fn removals_and_additions_are_kept_apart() {
        let (_dir, stage) = stage_in_temp_dir();
        stage
            .stage_addition("kept.txt", &Bytes::from_static(b"kept"))
            .unwrap();
        stage.stage_removal("gone.txt").unwrap();

        assert_eq!(
            stage.additions().unwrap().keys().cloned().collect::<Vec<_>>(),
            vec!["kept.txt".to_string()]
        );
        assert_eq!(
            stage.removals().unwrap().into_iter().collect::<Vec<_>>(),
            vec!["gone.txt".to_string()]
        );
    }

    #[test]
    fn clear_empties_both_sets() {
        let (_dir, stage) = stage_in_temp_dir();
        stage
            .stage_addition("a.txt", &Bytes::from_static(b"alpha"))
            .unwrap();
        stage.stage_removal("b.txt").unwrap();

        stage.clear().unwrap();

        assert!(stage.is_empty().unwrap());
        assert!(stage.additions().unwrap().is_empty());
        assert!(stage.removals().unwrap().is_empty());
    }
}
