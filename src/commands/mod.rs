//! Command implementations
//!
//! Every porcelain command is an `impl Repository` block in its own
//! file. Commands report user errors by writing the prescribed string
//! to the repository's writer and returning `Ok(())`; only internal
//! failures (I/O, corruption) propagate as errors.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod fetch;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod push;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;

/// Branch created by `init` and checked out initially
pub(crate) const DEFAULT_BRANCH: &str = "master";

/// Guard message shared by checkout, reset, and merge
pub(crate) const UNTRACKED_FILE_IN_THE_WAY: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.";
