//! Blob object
//!
//! Blobs store one file's content at one point in time. They contain only
//! the raw bytes; the tracking filename lives in the commit tree.
//!
//! ## Format
//!
//! On disk: the raw bytes, stored under their own fingerprint.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

/// Blob object representing file content
///
/// Each unique file content is stored exactly once, identified by the
/// SHA-1 fingerprint of its bytes.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    /// File content
    data: Bytes,
}

impl Blob {
    /// Get the raw content bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Compute the blob's fingerprint (SHA-1 of the raw bytes)
    pub fn fingerprint(&self) -> ObjectId {
        ObjectId::of_bytes(&self.data)
    }
}

impl From<Vec<u8>> for Blob {
    fn from(data: Vec<u8>) -> Self {
        Blob::new(Bytes::from(data))
    }
}
