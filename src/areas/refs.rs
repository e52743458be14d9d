//! Branch and head index
//!
//! Maintains the three index files inside the repository directory:
//!
//! - `headMap`: JSON map from branch name to head commit fingerprint,
//!   kept as a `BTreeMap` so branch listings and the on-disk form are
//!   lexicographic
//! - `currentBranch`: plain text file naming the current branch
//! - `shortCommitIdMap`: JSON map from 8-hex prefix to full fingerprint,
//!   recording every commit ever created in this repository

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

const HEAD_MAP_FILE: &str = "headMap";
const CURRENT_BRANCH_FILE: &str = "currentBranch";
const SHORT_ID_MAP_FILE: &str = "shortCommitIdMap";

/// Branch index of one repository
///
/// Rooted at a repository directory (`.gitlet`). The same type serves
/// the local repository and remote repositories reached by path.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory
    path: Box<Path>,
}

impl Refs {
    fn head_map_path(&self) -> PathBuf {
        self.path.join(HEAD_MAP_FILE)
    }

    fn current_branch_path(&self) -> PathBuf {
        self.path.join(CURRENT_BRANCH_FILE)
    }

    fn short_id_map_path(&self) -> PathBuf {
        self.path.join(SHORT_ID_MAP_FILE)
    }

    /// Read the full branch -> head mapping
    pub fn head_map(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let path = self.head_map_path();
        let raw = std::fs::read(&path)
            .context(format!("Unable to read branch index {}", path.display()))?;

        serde_json::from_slice(&raw)
            .context(format!("Corrupt branch index {}", path.display()))
    }

    pub fn write_head_map(&self, head_map: &BTreeMap<String, ObjectId>) -> anyhow::Result<()> {
        let path = self.head_map_path();
        let raw = serde_json::to_vec(head_map)?;

        std::fs::write(&path, raw)
            .context(format!("Unable to write branch index {}", path.display()))
    }

    /// Head fingerprint of a branch, if the branch exists
    pub fn head_of(&self, branch: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.head_map()?.get(branch).cloned())
    }

    /// Point a branch at a commit, creating the branch if needed
    pub fn set_head(&self, branch: &str, commit_id: &ObjectId) -> anyhow::Result<()> {
        let mut head_map = self.head_map()?;
        head_map.insert(branch.to_string(), commit_id.clone());

        self.write_head_map(&head_map)
    }

    /// Name of the current branch
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let path = self.current_branch_path();
        let name = std::fs::read_to_string(&path)
            .context(format!("Unable to read current branch {}", path.display()))?;

        Ok(name.trim().to_string())
    }

    pub fn set_current(&self, branch: &str) -> anyhow::Result<()> {
        let path = self.current_branch_path();

        std::fs::write(&path, branch)
            .context(format!("Unable to write current branch {}", path.display()))
    }

    /// Record a newly created commit in the short-id table
    pub fn record_short(&self, commit_id: &ObjectId) -> anyhow::Result<()> {
        let mut table = self.short_id_map()?;
        table.insert(commit_id.short(), commit_id.clone());

        let raw = serde_json::to_vec(&table)?;
        let path = self.short_id_map_path();
        std::fs::write(&path, raw)
            .context(format!("Unable to write short-id table {}", path.display()))
    }

    /// Resolve an 8-hex prefix to the full fingerprint it abbreviates
    pub fn resolve_short(&self, prefix: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.short_id_map()?.get(prefix).cloned())
    }

    fn short_id_map(&self) -> anyhow::Result<HashMap<String, ObjectId>> {
        let path = self.short_id_map_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let raw = std::fs::read(&path)
            .context(format!("Unable to read short-id table {}", path.display()))?;
        serde_json::from_slice(&raw)
            .context(format!("Corrupt short-id table {}", path.display()))
    }
}
