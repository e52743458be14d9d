//! Data structures and algorithms
//!
//! - `merge`: split-point selection and conflict content
//! - `objects`: object types (blob, commit) and fingerprints
//! - `status`: working-tree status classification and rendering

pub mod merge;
pub mod objects;
pub mod status;
