//! Object store
//!
//! Persists blobs and commits by fingerprint inside the repository
//! directory. The store is append-only: objects are written once under
//! their fingerprint and never rewritten.
//!
//! ## Storage Format
//!
//! - Blobs: `.gitlet/blobs/<40-hex>`, the raw file bytes
//! - Commits: `.gitlet/commits/<40-hex>`, the canonical serialized record
//!
//! Storing an object whose fingerprint already exists is a no-op, so
//! identical content is stored exactly once.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Blob directory name inside the repository directory
const BLOBS_DIR: &str = "blobs";

/// Commit directory name inside the repository directory
const COMMITS_DIR: &str = "commits";

/// Content-addressed object store
///
/// Rooted at a repository directory (`.gitlet`); manages the `blobs/`
/// and `commits/` subdirectories.
#[derive(Debug)]
pub struct Database {
    /// Path to the repository directory
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(BLOBS_DIR)
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(COMMITS_DIR)
    }

    /// Path of the blob file for a fingerprint
    pub fn blob_path(&self, blob_id: &ObjectId) -> PathBuf {
        self.blobs_path().join(blob_id.to_path())
    }

    /// Path of the commit file for a fingerprint
    pub fn commit_path(&self, commit_id: &ObjectId) -> PathBuf {
        self.commits_path().join(commit_id.to_path())
    }

    /// Store a blob; idempotent
    ///
    /// # Returns
    ///
    /// The fingerprint of the stored bytes
    pub fn put_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let blob_id = blob.fingerprint();
        let blob_path = self.blob_path(&blob_id);

        if !blob_path.exists() {
            std::fs::write(&blob_path, blob.data()).context(format!(
                "Unable to write blob file {}",
                blob_path.display()
            ))?;
        }

        Ok(blob_id)
    }

    /// Load a blob
    pub fn get_blob(&self, blob_id: &ObjectId) -> anyhow::Result<Blob> {
        let blob_path = self.blob_path(blob_id);

        let data = std::fs::read(&blob_path)
            .context(format!("Missing blob object {blob_id}"))?;
        Ok(Blob::from(data))
    }

    pub fn contains_blob(&self, blob_id: &ObjectId) -> bool {
        self.blob_path(blob_id).exists()
    }

    /// Store a commit record under the fingerprint of its canonical
    /// serialization; idempotent
    pub fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let record = commit.serialize();
        let commit_id = ObjectId::of_bytes(&record);
        let commit_path = self.commit_path(&commit_id);

        if !commit_path.exists() {
            std::fs::write(&commit_path, &record).context(format!(
                "Unable to write commit file {}",
                commit_path.display()
            ))?;
        }

        Ok(commit_id)
    }

    /// Load and decode a commit record
    pub fn get_commit(&self, commit_id: &ObjectId) -> anyhow::Result<Commit> {
        let commit_path = self.commit_path(commit_id);

        let record = std::fs::read(&commit_path)
            .context(format!("Missing commit object {commit_id}"))?;
        Commit::deserialize(Cursor::new(record))
            .context(format!("Corrupt commit object {commit_id}"))
    }

    pub fn contains_commit(&self, commit_id: &ObjectId) -> bool {
        self.commit_path(commit_id).exists()
    }

    /// List every stored commit fingerprint in lexicographic order
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        Self::list_ids(&self.commits_path())
    }

    /// List every stored blob fingerprint in lexicographic order
    pub fn list_blob_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        Self::list_ids(&self.blobs_path())
    }

    fn list_ids(dir: &Path) -> anyhow::Result<Vec<ObjectId>> {
        let mut ids = std::fs::read_dir(dir)
            .context(format!("Unable to read object directory {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| ObjectId::try_parse(entry.file_name().to_string_lossy().into_owned()).ok())
            .collect::<Vec<_>>();
        ids.sort();

        Ok(ids)
    }
}

/// Commit cache for repeated graph traversals
///
/// Decoded commit records are memoized so history walks (log, split
/// point, push ancestry) decode each record at most once per command.
/// The cache is write-through: newly created commits are inserted when
/// they are stored.
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: HashMap<ObjectId, Commit>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created commit (write-through on store)
    pub fn insert(&mut self, commit_id: ObjectId, commit: Commit) {
        self.commits.insert(commit_id, commit);
    }

    /// Get a commit, decoding it from the database on first access
    pub fn get_or_load(
        &mut self,
        database: &Database,
        commit_id: &ObjectId,
    ) -> anyhow::Result<Commit> {
        if let Some(commit) = self.commits.get(commit_id) {
            return Ok(commit.clone());
        }

        let commit = database.get_commit(commit_id)?;
        self.commits.insert(commit_id.clone(), commit.clone());

        Ok(commit)
    }
}
