//! Repository abstraction and coordination
//!
//! This module provides the main `Repository` type that coordinates all
//! repository operations. It acts as a facade over the lower-level areas
//! (database, stage, workspace, refs, remotes); the porcelain commands
//! are implemented as `impl Repository` blocks under `crate::commands`.
//!
//! All state lives in fields of this handle; nothing is process-global.
//! Commit records link by fingerprint only, so the decoded-commit cache
//! is purely an in-memory convenience and is never serialized.

use crate::areas::database::{CommitCache, Database};
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::merge::split_point::CommitLinks;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_ID_LENGTH};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Repository directory name
pub const GITLET_DIR: &str = ".gitlet";

/// Stage directory name inside the repository directory
const STAGE_DIR: &str = "stage";

/// Gitlet repository
///
/// Coordinates all repository operations and provides access to the
/// database, stage, workspace, refs, and remotes subsystems. This is
/// the entry point for every command.
pub struct Repository {
    /// Repository root path (the working directory)
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Object database
    database: Database,
    /// Staging area
    stage: Stage,
    /// Working directory
    workspace: Workspace,
    /// Branch and head index
    refs: Refs,
    /// Remote registry
    remotes: Remotes,
    /// Decoded-commit cache, write-through on commit creation
    commits: RefCell<CommitCache>,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .context(format!("Invalid repository path {}", path.display()))?;
        let gitlet_dir = path.join(GITLET_DIR);

        let database = Database::new(gitlet_dir.clone().into_boxed_path());
        let stage = Stage::new(gitlet_dir.join(STAGE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_dir.clone().into_boxed_path());
        let remotes = Remotes::new(
            gitlet_dir.into_boxed_path(),
            path.clone().into_boxed_path(),
        );

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            stage,
            workspace,
            refs,
            remotes,
            commits: RefCell::new(CommitCache::new()),
        })
    }

    /// Whether a repository has been initialized at the given root
    pub fn is_initialized(path: &Path) -> bool {
        path.join(GITLET_DIR).is_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_dir(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn stage_dir(&self) -> PathBuf {
        self.gitlet_dir().join(STAGE_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    /// Fingerprint of the current branch's head commit
    pub fn head_id(&self) -> anyhow::Result<ObjectId> {
        let current = self.refs.current_branch()?;

        self.refs
            .head_of(&current)?
            .context(format!("Current branch {current} has no head commit"))
    }

    /// The current branch's head commit
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_id = self.head_id()?;
        self.commit_by_id(&head_id)
    }

    /// Load a commit through the decoded-commit cache
    pub fn commit_by_id(&self, commit_id: &ObjectId) -> anyhow::Result<Commit> {
        self.commits
            .borrow_mut()
            .get_or_load(&self.database, commit_id)
    }

    /// Record a freshly stored commit in the cache (write-through)
    pub fn cache_commit(&self, commit_id: ObjectId, commit: Commit) {
        self.commits.borrow_mut().insert(commit_id, commit);
    }

    /// Resolve a user-supplied commit id (full or 8-hex prefix)
    ///
    /// # Returns
    ///
    /// None when the id does not name a stored commit; the caller owns
    /// the `No commit with that id exists.` report.
    pub fn resolve_commit_id(&self, raw: &str) -> anyhow::Result<Option<ObjectId>> {
        if raw.len() == OBJECT_ID_LENGTH {
            let commit_id = match ObjectId::try_parse(raw.to_string()) {
                Ok(commit_id) => commit_id,
                Err(_) => return Ok(None),
            };
            if self.database.contains_commit(&commit_id) {
                return Ok(Some(commit_id));
            }
            return Ok(None);
        }

        if raw.len() == SHORT_ID_LENGTH {
            return self.refs.resolve_short(raw);
        }

        Ok(None)
    }

    /// Parent links of a commit, for graph walks
    ///
    /// Every stored commit's parents exist in the store, so a commit
    /// that cannot be loaded contributes no links, which simply ends
    /// the walk on that path.
    pub fn commit_links(&self, commit_id: &ObjectId) -> CommitLinks {
        self.commit_by_id(commit_id)
            .map(|commit| CommitLinks {
                parents: commit.parents().cloned().collect(),
            })
            .unwrap_or_default()
    }
}
