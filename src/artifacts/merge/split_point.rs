//! Split-point selection for merges
//!
//! Finds the common ancestor of two branch heads that a three-way merge
//! uses as its base. The commit graph is a DAG in which every node has
//! 0, 1, or 2 parents.
//!
//! ## Algorithm
//!
//! Two walks over parent links, both in pre-order with an explicit work
//! stack (deep histories must not exhaust the call stack):
//!
//! 1. Walk from the current head, assigning each visited commit a depth
//!    tag: 0 at the head, decremented by one per descent. A commit
//!    reachable over several paths keeps the most recently assigned tag
//!    (last writer wins).
//! 2. Walk from the given head; every commit carrying a tag becomes a
//!    candidate, and the walk does not descend through a candidate's
//!    ancestors.
//!
//! The split point is the candidate with the greatest (least negative)
//! tag. Ties are broken arbitrarily.
//!
//! Both walks double as ancestry probes: meeting the given head during
//! the first walk means the given branch is already merged in, and
//! meeting the current head during the second means the merge is a pure
//! fast-forward. Those short-circuits are reported instead of a split
//! point.
//!
//! The finder takes a loader function so it can run against any commit
//! source (the on-disk store, or an in-memory graph in tests).

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;

/// Parent links of one commit, as needed by graph walks
#[derive(Debug, Clone, Default)]
pub struct CommitLinks {
    /// Parent fingerprints, first parent first (0, 1, or 2 entries)
    pub parents: Vec<ObjectId>,
}

/// Result of split-point selection for a prospective merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// A genuine three-way merge with the given base
    Split(ObjectId),
    /// Both branches point at the same commit; the merge is a no-op
    SameHead,
    /// The given head is an ancestor of the current head
    GivenIsAncestor,
    /// The current head is an ancestor of the given head
    FastForward,
}

/// Split-point finder over a commit DAG
///
/// `load` maps a commit fingerprint to its parent links. It must
/// resolve every commit reachable from the two heads, which the object
/// store guarantees for on-disk graphs.
pub struct SplitPointFinder<LoadFn>
where
    LoadFn: Fn(&ObjectId) -> CommitLinks,
{
    load: LoadFn,
}

impl<LoadFn> SplitPointFinder<LoadFn>
where
    LoadFn: Fn(&ObjectId) -> CommitLinks,
{
    pub fn new(load: LoadFn) -> Self {
        Self { load }
    }

    /// Select the split point for merging `given_head` into `current_head`
    pub fn find(
        &self,
        current_head: &ObjectId,
        given_head: &ObjectId,
    ) -> anyhow::Result<SplitOutcome> {
        if current_head == given_head {
            return Ok(SplitOutcome::SameHead);
        }

        let tags = match self.tag_ancestors(current_head, given_head) {
            Some(tags) => tags,
            None => return Ok(SplitOutcome::GivenIsAncestor),
        };

        let candidates = match self.collect_candidates(given_head, current_head, &tags) {
            Some(candidates) => candidates,
            None => return Ok(SplitOutcome::FastForward),
        };

        candidates
            .into_iter()
            .max_by_key(|(_, tag)| *tag)
            .map(|(split_point, _)| SplitOutcome::Split(split_point))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no common ancestor between {current_head} and {given_head}"
                )
            })
    }

    /// Pre-order walk from `head`, tagging every reachable commit with its
    /// depth. Returns None if `stop` is encountered.
    ///
    /// The stack holds (commit, depth) frames; parents are pushed in
    /// reverse so the first parent's subtree is tagged before the second
    /// parent's, reproducing the recursive write order that last-writer-wins
    /// tagging depends on.
    fn tag_ancestors(&self, head: &ObjectId, stop: &ObjectId) -> Option<HashMap<ObjectId, i64>> {
        let mut tags = HashMap::new();
        let mut stack = vec![(head.clone(), 0i64)];

        while let Some((commit_id, depth)) = stack.pop() {
            if &commit_id == stop {
                return None;
            }

            let links = (self.load)(&commit_id);
            tags.insert(commit_id, depth);

            for parent in links.parents.iter().rev() {
                stack.push((parent.clone(), depth - 1));
            }
        }

        Some(tags)
    }

    /// Pre-order walk from `head`, collecting tagged commits as split-point
    /// candidates without descending past them. Returns None if `stop` is
    /// encountered.
    fn collect_candidates(
        &self,
        head: &ObjectId,
        stop: &ObjectId,
        tags: &HashMap<ObjectId, i64>,
    ) -> Option<HashMap<ObjectId, i64>> {
        let mut candidates = HashMap::new();
        let mut stack = vec![head.clone()];

        while let Some(commit_id) = stack.pop() {
            if &commit_id == stop {
                return None;
            }

            if let Some(tag) = tags.get(&commit_id) {
                candidates.insert(commit_id, *tag);
                continue;
            }

            let links = (self.load)(&commit_id);
            for parent in links.parents.iter().rev() {
                stack.push(parent.clone());
            }
        }

        Some(candidates)
    }
}
