//! Object identifier (SHA-1 fingerprint)
//!
//! Fingerprints are 40-character hexadecimal strings identifying every
//! object in the repository (blobs and commits).
//!
//! ## Format
//!
//! - Full: 40 hex characters
//! - Short: first 8 characters, recorded in the short-id table
//! - Abbreviated: first 7 characters, used by log's `Merge:` line

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_ID_LENGTH};
use serde::Deserialize;
use serde::de::Error as _;
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Object identifier (SHA-1 fingerprint)
///
/// A validated 40-character hexadecimal string that uniquely identifies
/// a blob or commit in the object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Compute the fingerprint of a byte sequence
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);

        let digest = hasher.finalize();
        Self(format!("{digest:x}"))
    }

    /// Convert to the file name under which the object is stored
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Get the 8-character prefix used by the short-id table
    pub fn short(&self) -> String {
        self.0.split_at(SHORT_ID_LENGTH).0.to_string()
    }

    /// Get the 7-character abbreviation used in log output
    pub fn abbrev(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for ObjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ObjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::try_parse(raw).map_err(D::Error::custom)
    }
}
