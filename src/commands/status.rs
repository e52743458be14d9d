use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::report::StatusReport;
use crate::artifacts::status::scanner::Scanner;
use std::collections::BTreeMap;

impl Repository {
    /// Display branches, staged and removed files, unstaged
    /// modifications, and untracked files
    pub fn status(&self) -> anyhow::Result<()> {
        let current = self.refs().current_branch()?;
        let branches = self
            .refs()
            .head_map()?
            .keys()
            .map(|name| {
                if *name == current {
                    format!("*{name}")
                } else {
                    name.clone()
                }
            })
            .collect();

        let additions = self.stage().additions()?;
        let removals = self.stage().removals()?;
        let staged = additions.keys().cloned().collect();
        let removed = removals.iter().cloned().collect();

        let addition_ids = additions
            .iter()
            .map(|(filename, data)| (filename.clone(), ObjectId::of_bytes(data)))
            .collect::<BTreeMap<_, _>>();
        let head_tree = self.head_commit()?.tree().clone();
        let worktree = self.workspace().fingerprints()?;

        let scanner = Scanner::new(&head_tree, &addition_ids, &removals, &worktree);
        let report = StatusReport::new(
            branches,
            staged,
            removed,
            scanner.modifications_not_staged(),
            scanner.untracked(),
        );

        report.write_to(&mut *self.writer())
    }
}
