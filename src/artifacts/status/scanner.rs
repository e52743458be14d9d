//! Status classification logic
//!
//! Compares four views of the tracked file set to classify changes:
//! the current commit's tree, the staged additions, the pending
//! removals, and the working directory.
//!
//! The scanner works on plain fingerprint maps so the classification
//! rules can be tested without touching the filesystem; the status
//! command assembles those maps from the repository.

use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Status scanner over snapshots of the staging area, commit tree, and
/// working directory
///
/// All maps are keyed by filename; values are content fingerprints.
#[derive(Debug, new)]
pub struct Scanner<'a> {
    /// Tree of the current head commit
    head_tree: &'a BTreeMap<String, ObjectId>,
    /// Staged additions and the fingerprints of their staged bytes
    additions: &'a BTreeMap<String, ObjectId>,
    /// Filenames staged for removal
    removals: &'a BTreeSet<String>,
    /// Working-directory files and their current fingerprints
    worktree: &'a BTreeMap<String, ObjectId>,
}

impl Scanner<'_> {
    /// Files changed in the working directory but not staged that way
    ///
    /// Entries are rendered as `<filename> (modified)` or
    /// `<filename> (deleted)`, deduplicated and sorted:
    /// - staged for addition, but the staged bytes differ from the
    ///   working-tree bytes -> modified
    /// - staged for addition, but missing from the working tree -> deleted
    /// - tracked by the current commit, changed in the working tree, and
    ///   not staged -> modified
    /// - tracked by the current commit, missing from the working tree, and
    ///   not staged for removal -> deleted
    pub fn modifications_not_staged(&self) -> Vec<String> {
        let mut out = BTreeSet::new();

        for (filename, staged_id) in self.additions {
            match self.worktree.get(filename) {
                None => {
                    out.insert(format!("{filename} (deleted)"));
                }
                Some(worktree_id) if worktree_id != staged_id => {
                    out.insert(format!("{filename} (modified)"));
                }
                Some(_) => {}
            }
        }

        for (filename, tracked_id) in self.head_tree {
            if !self.worktree.contains_key(filename) && !self.removals.contains(filename) {
                out.insert(format!("{filename} (deleted)"));
            }
            if let Some(worktree_id) = self.worktree.get(filename)
                && worktree_id != tracked_id
                && !self.additions.contains_key(filename)
            {
                out.insert(format!("{filename} (modified)"));
            }
        }

        out.into_iter().collect()
    }

    /// Files present in the working directory but neither tracked by the
    /// current commit nor staged for addition
    ///
    /// A file staged for removal and then re-created shows up here.
    pub fn untracked(&self) -> Vec<String> {
        self.worktree
            .keys()
            .filter(|filename| {
                !self.head_tree.contains_key(*filename)
                    && !self.additions.contains_key(*filename)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fp(data: &str) -> ObjectId {
        ObjectId::of_bytes(data.as_bytes())
    }

    struct Fixture {
        head_tree: BTreeMap<String, ObjectId>,
        additions: BTreeMap<String, ObjectId>,
        removals: BTreeSet<String>,
        worktree: BTreeMap<String, ObjectId>,
    }

    impl Fixture {
        fn empty() -> Self {
            Fixture {
                head_tree: BTreeMap::new(),
                additions: BTreeMap::new(),
                removals: BTreeSet::new(),
                worktree: BTreeMap::new(),
            }
        }

        fn scanner(&self) -> Scanner<'_> {
            Scanner::new(&self.head_tree, &self.additions, &self.removals, &self.worktree)
        }
    }

    #[test]
    fn clean_repository_reports_nothing() {
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("a.txt".into(), fp("one"));
        fixture.worktree.insert("a.txt".into(), fp("one"));

        assert!(fixture.scanner().modifications_not_staged().is_empty());
        assert!(fixture.scanner().untracked().is_empty());
    }

    #[test]
    fn staged_file_edited_afterwards_is_modified() {
        let mut fixture = Fixture::empty();
        fixture.additions.insert("a.txt".into(), fp("staged"));
        fixture.worktree.insert("a.txt".into(), fp("edited"));

        assert_eq!(
            fixture.scanner().modifications_not_staged(),
            vec!["a.txt (modified)".to_string()]
        );
    }

    #[test]
    fn staged_file_deleted_afterwards_is_deleted() {
        let mut fixture = Fixture::empty();
        fixture.additions.insert("a.txt".into(), fp("staged"));

        assert_eq!(
            fixture.scanner().modifications_not_staged(),
            vec!["a.txt (deleted)".to_string()]
        );
    }

    #[test]
    fn tracked_file_edited_without_staging_is_modified() {
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("a.txt".into(), fp("committed"));
        fixture.worktree.insert("a.txt".into(), fp("edited"));

        assert_eq!(
            fixture.scanner().modifications_not_staged(),
            vec!["a.txt (modified)".to_string()]
        );
    }

    #[test]
    fn tracked_file_missing_without_removal_is_deleted() {
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("a.txt".into(), fp("committed"));

        assert_eq!(
            fixture.scanner().modifications_not_staged(),
            vec!["a.txt (deleted)".to_string()]
        );
    }

    #[test]
    fn tracked_file_missing_with_pending_removal_is_quiet() {
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("a.txt".into(), fp("committed"));
        fixture.removals.insert("a.txt".into());

        assert!(fixture.scanner().modifications_not_staged().is_empty());
    }

    #[test]
    fn staged_version_shadows_the_tracked_comparison() {
        // The working tree matches the staged bytes, so the difference
        // against the committed version is already accounted for.
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("a.txt".into(), fp("committed"));
        fixture.additions.insert("a.txt".into(), fp("staged"));
        fixture.worktree.insert("a.txt".into(), fp("staged"));

        assert!(fixture.scanner().modifications_not_staged().is_empty());
    }

    #[test]
    fn unknown_worktree_file_is_untracked() {
        let mut fixture = Fixture::empty();
        fixture.worktree.insert("new.txt".into(), fp("new"));

        assert_eq!(fixture.scanner().untracked(), vec!["new.txt".to_string()]);
    }

    #[test]
    fn recreated_file_staged_for_removal_is_untracked() {
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("a.txt".into(), fp("committed"));
        fixture.removals.insert("a.txt".into());
        fixture.worktree.insert("a.txt".into(), fp("recreated"));

        assert_eq!(fixture.scanner().untracked(), vec!["a.txt".to_string()]);
    }

    #[test]
    fn entries_come_out_sorted() {
        let mut fixture = Fixture::empty();
        fixture.head_tree.insert("b.txt".into(), fp("b"));
        fixture.head_tree.insert("a.txt".into(), fp("a"));

        assert_eq!(
            fixture.scanner().modifications_not_staged(),
            vec!["a.txt (deleted)".to_string(), "b.txt (deleted)".to_string()]
        );
    }
}
