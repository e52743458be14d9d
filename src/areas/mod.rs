//! Persistent areas of the repository
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `refs`: branch heads, current branch, short-id table
//! - `remotes`: remote name registry
//! - `repository`: high-level coordination and the command facade
//! - `stage`: staging area for pending additions and removals
//! - `workspace`: working directory file access

pub(crate) mod database;
pub(crate) mod refs;
pub(crate) mod remotes;
pub mod repository;
pub(crate) mod stage;
pub(crate) mod workspace;
