#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A fresh directory with `gitlet init` already run in it
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run a command expected to succeed and capture its stdout
pub fn gitlet_stdout(dir: &Path, args: &[&str]) -> String {
    let assertion = run_gitlet(dir, args).assert().success();
    let stdout = assertion.get_output().stdout.clone();

    String::from_utf8(stdout).expect("Invalid UTF-8 in command output")
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content)
        .unwrap_or_else(|e| panic!("Failed to write file {name}: {e}"));
}

pub fn read_file(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to read file {name}: {e}"))
}

pub fn file_exists(dir: &Path, name: &str) -> bool {
    dir.join(name).is_file()
}

/// Parse a repository's branch index file
pub fn head_map(dir: &Path) -> serde_json::Value {
    let raw = std::fs::read(dir.join(".gitlet").join("headMap"))
        .expect("Failed to read headMap");

    serde_json::from_slice(&raw).expect("Corrupt headMap")
}

/// Fingerprint of the current head commit, extracted from `log`
pub fn head_commit_id(dir: &Path) -> String {
    let log = gitlet_stdout(dir, &["log"]);
    log.lines()
        .find_map(|line| line.strip_prefix("commit "))
        .expect("log output carries no commit line")
        .to_string()
}

/// Number of files in a repository's commits directory
pub fn stored_commit_count(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".gitlet").join("commits"))
        .expect("Failed to read commits directory")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .count()
}

/// The empty sections every fresh repository reports
pub const EMPTY_STATUS_TAIL: &str = "\
=== Staged Files ===

=== Removed Files ===

=== Modifications Not Staged For Commit ===

=== Untracked Files ===

";
