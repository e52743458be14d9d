//! Working directory
//!
//! File-level access to the directory the repository lives in. The
//! system tracks plain files at the top level only; the repository
//! directory itself is never listed.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Paths never reported as working-directory content
const IGNORED_PATHS: [&str; 1] = [".gitlet"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }

    /// List the plain files in the working directory, in name order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut names = std::fs::read_dir(self.path.as_ref())
            .context(format!(
                "Unable to read working directory {}",
                self.path.display()
            ))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !IGNORED_PATHS.contains(&name.as_str()))
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    pub fn file_exists(&self, filename: &str) -> bool {
        self.file_path(filename).is_file()
    }

    pub fn read_file(&self, filename: &str) -> anyhow::Result<Bytes> {
        let path = self.file_path(filename);

        let data = std::fs::read(&path)
            .context(format!("Unable to read file {}", path.display()))?;
        Ok(Bytes::from(data))
    }

    /// Read a working-tree file as a blob
    pub fn parse_blob(&self, filename: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(filename)?))
    }

    pub fn write_file(&self, filename: &str, data: &[u8]) -> anyhow::Result<()> {
        let path = self.file_path(filename);

        std::fs::write(&path, data)
            .context(format!("Unable to write file {}", path.display()))
    }

    /// Delete a file, best effort: a missing file is not an error
    pub fn remove_file(&self, filename: &str) {
        let _ = std::fs::remove_file(self.file_path(filename));
    }

    /// Fingerprint of a working-tree file's current content
    pub fn fingerprint_of(&self, filename: &str) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::of_bytes(&self.read_file(filename)?))
    }

    /// Snapshot of the working directory: filename -> content fingerprint
    pub fn fingerprints(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        self.list_files()?
            .into_iter()
            .map(|name| {
                let fingerprint = self.fingerprint_of(&name)?;
                Ok((name, fingerprint))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn workspace_in_temp_dir() -> (assert_fs::TempDir, Workspace) {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        (dir, workspace)
    }

    #[test]
    fn lists_plain_files_in_name_order() {
        let (dir, workspace) = workspace_in_temp_dir();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        assert_eq!(
            workspace.list_files().unwrap(),
            vec!["a.txt".to_string(), "b.txt".to_string()]
        );
    }

    #[test]
    fn the_repository_directory_is_never_listed() {
        let (dir, workspace) = workspace_in_temp_dir();
        std::fs::create_dir(dir.path().join(".gitlet")).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();

        assert_eq!(workspace.list_files().unwrap(), vec!["a.txt".to_string()]);
    }

    #[test]
    fn file_round_trip_preserves_bytes() {
        let (_dir, workspace) = workspace_in_temp_dir();
        workspace.write_file("data.bin", b"\x00\x01wug").unwrap();

        assert_eq!(
            workspace.read_file("data.bin").unwrap(),
            Bytes::from_static(b"\x00\x01wug")
        );
    }

    #[test]
    fn removing_a_missing_file_is_quiet() {
        let (_dir, workspace) = workspace_in_temp_dir();
        workspace.remove_file("never-existed.txt");
    }

    #[test]
    fn fingerprints_snapshot_matches_contents() {
        let (_dir, workspace) = workspace_in_temp_dir();
        workspace.write_file("a.txt", b"hello\n").unwrap();

        let snapshot = workspace.fingerprints().unwrap();
        assert_eq!(
            snapshot.get("a.txt"),
            Some(&ObjectId::of_bytes(b"hello\n"))
        );
    }
}
