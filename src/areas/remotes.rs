//! Remote descriptors
//!
//! A remote is another repository reachable by filesystem path. The
//! `remoteMap` file holds a JSON map from remote name to descriptor;
//! relative paths resolve against the repository root, and a trailing
//! `.gitlet` component in a configured path is dropped so descriptors
//! always point at the remote's working directory.

use anyhow::Context;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const REMOTE_MAP_FILE: &str = "remoteMap";

/// One configured remote
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct RemoteDescriptor {
    /// Path to the remote's working directory, as configured
    pub path: String,
}

/// Remote name registry of one repository
#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the repository directory (`.gitlet`)
    path: Box<Path>,
    /// Repository root, used to resolve relative remote paths
    root: Box<Path>,
}

impl Remotes {
    fn map_path(&self) -> PathBuf {
        self.path.join(REMOTE_MAP_FILE)
    }

    /// Read the remote name -> descriptor mapping
    pub fn map(&self) -> anyhow::Result<BTreeMap<String, RemoteDescriptor>> {
        let path = self.map_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = std::fs::read(&path)
            .context(format!("Unable to read remote map {}", path.display()))?;
        serde_json::from_slice(&raw)
            .context(format!("Corrupt remote map {}", path.display()))
    }

    fn write_map(&self, map: &BTreeMap<String, RemoteDescriptor>) -> anyhow::Result<()> {
        let path = self.map_path();
        let raw = serde_json::to_vec(map)?;

        std::fs::write(&path, raw)
            .context(format!("Unable to write remote map {}", path.display()))
    }

    /// Register a remote under a new name
    ///
    /// # Returns
    ///
    /// false if the name is already taken
    pub fn add(&self, name: &str, configured_path: &str) -> anyhow::Result<bool> {
        let mut map = self.map()?;
        if map.contains_key(name) {
            return Ok(false);
        }

        map.insert(
            name.to_string(),
            RemoteDescriptor::new(normalize(configured_path)),
        );
        self.write_map(&map)?;

        Ok(true)
    }

    /// Drop a remote registration
    ///
    /// # Returns
    ///
    /// false if no remote carries the name
    pub fn remove(&self, name: &str) -> anyhow::Result<bool> {
        let mut map = self.map()?;
        if map.remove(name).is_none() {
            return Ok(false);
        }
        self.write_map(&map)?;

        Ok(true)
    }

    /// Resolve a remote name to the remote's working-directory path
    pub fn resolve(&self, name: &str) -> anyhow::Result<Option<PathBuf>> {
        Ok(self.map()?.get(name).map(|descriptor| {
            let configured = Path::new(&descriptor.path);
            if configured.is_absolute() {
                configured.to_path_buf()
            } else {
                self.root.join(configured)
            }
        }))
    }
}

/// Drop a trailing `.gitlet` component from a configured remote path
fn normalize(configured_path: &str) -> String {
    let path = Path::new(configured_path);
    if path.file_name().is_some_and(|name| name == ".gitlet") {
        if let Some(parent) = path.parent() {
            return parent.to_string_lossy().into_owned();
        }
    }

    configured_path.to_string()
}
