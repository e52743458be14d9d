use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

mod common;
use common::{head_commit_id, head_map, read_file, repository_dir, run_gitlet, write_file};

/// Two sibling repositories, `local` and `remote`, with the remote
/// registered in the local one under the name `R`
fn pair(root: &Path) -> (PathBuf, PathBuf) {
    let local = root.join("local");
    let remote = root.join("remote");
    std::fs::create_dir(&local).unwrap();
    std::fs::create_dir(&remote).unwrap();

    run_gitlet(&local, &["init"]).assert().success();
    run_gitlet(&remote, &["init"]).assert().success();
    run_gitlet(&local, &["add-remote", "R", "../remote/.gitlet"])
        .assert()
        .success();

    (local, remote)
}

fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(dir, name, content);
    run_gitlet(dir, &["add", name]).assert().success();
    run_gitlet(dir, &["commit", message]).assert().success();
}

#[rstest]
fn duplicate_remote_names_are_rejected(repository_dir: TempDir) {
    let (local, _remote) = pair(repository_dir.path());

    run_gitlet(&local, &["add-remote", "R", "../elsewhere"])
        .assert()
        .success()
        .stdout(predicate::eq("A remote with that name already exists.\n"));
}

#[rstest]
fn removing_an_unknown_remote_is_reported(repository_dir: TempDir) {
    let (local, _remote) = pair(repository_dir.path());

    run_gitlet(&local, &["rm-remote", "S"])
        .assert()
        .success()
        .stdout(predicate::eq("A remote with that name does not exist.\n"));
}

#[rstest]
fn removed_remote_is_forgotten(repository_dir: TempDir) {
    let (local, _remote) = pair(repository_dir.path());

    run_gitlet(&local, &["rm-remote", "R"]).assert().success();
    run_gitlet(&local, &["push", "R", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Remote directory not found.\n"));
}

#[rstest]
fn push_to_a_missing_remote_directory_is_reported(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    std::fs::remove_dir_all(remote.join(".gitlet")).unwrap();

    run_gitlet(&local, &["push", "R", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Remote directory not found.\n"));
}

#[rstest]
fn push_copies_commits_and_blobs_and_advances_the_remote_branch(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&local, "f.txt", "pushed content\n", "one");
    let local_head = head_commit_id(&local);

    run_gitlet(&local, &["push", "R", "master"]).assert().success();

    // The remote branch now equals the local head, the objects exist
    // remotely, and the remote working tree carries the pushed file.
    assert_eq!(head_map(&remote)["master"], head_map(&local)["master"]);
    assert!(remote.join(".gitlet").join("commits").join(&local_head).is_file());
    assert_eq!(read_file(&remote, "f.txt"), "pushed content\n");

    let remote_log = common::gitlet_stdout(&remote, &["log"]);
    assert!(remote_log.contains("one"));
}

#[rstest]
fn pushing_twice_reports_up_to_date(repository_dir: TempDir) {
    let (local, _remote) = pair(repository_dir.path());
    commit_file(&local, "f.txt", "content\n", "one");

    run_gitlet(&local, &["push", "R", "master"]).assert().success();
    run_gitlet(&local, &["push", "R", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Remote is already up-to-date. No need to push.\n"));
}

#[rstest]
fn push_requires_the_remote_head_to_be_an_ancestor(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&local, "f.txt", "local work\n", "local work");
    commit_file(&remote, "g.txt", "remote work\n", "remote work");

    run_gitlet(&local, &["push", "R", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Please pull down remote changes before pushing.\n"));
}

#[rstest]
fn push_creates_a_missing_remote_branch(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&local, "f.txt", "content\n", "one");

    run_gitlet(&local, &["push", "R", "feature"]).assert().success();

    assert_eq!(head_map(&remote)["feature"], head_map(&local)["master"]);
}

#[rstest]
fn fetch_mirrors_the_remote_branch(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&remote, "g.txt", "remote work\n", "remote work");
    let remote_head = head_commit_id(&remote);

    run_gitlet(&local, &["fetch", "R", "master"]).assert().success();

    assert_eq!(head_map(&local)["R/master"], head_map(&remote)["master"]);
    assert!(local.join(".gitlet").join("commits").join(&remote_head).is_file());
}

#[rstest]
fn fetch_of_a_branch_the_remote_lacks_is_reported(repository_dir: TempDir) {
    let (local, _remote) = pair(repository_dir.path());

    run_gitlet(&local, &["fetch", "R", "ghost"])
        .assert()
        .success()
        .stdout(predicate::eq("That remote does not have that branch.\n"));
}

#[rstest]
fn checked_out_mirror_branch_carries_the_fetched_tree(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&remote, "g.txt", "remote work\n", "remote work");

    run_gitlet(&local, &["fetch", "R", "master"]).assert().success();
    run_gitlet(&local, &["checkout", "R/master"]).assert().success();

    assert_eq!(read_file(&local, "g.txt"), "remote work\n");
}

#[rstest]
fn pull_fast_forwards_onto_remote_work(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&remote, "g.txt", "remote work\n", "remote work");

    run_gitlet(&local, &["pull", "R", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Current branch fast-forwarded.\n"));

    assert_eq!(read_file(&local, "g.txt"), "remote work\n");
    assert_eq!(head_commit_id(&local), head_commit_id(&remote));
}

#[rstest]
fn pull_merges_divergent_histories(repository_dir: TempDir) {
    let (local, remote) = pair(repository_dir.path());
    commit_file(&local, "mine.txt", "mine\n", "local work");
    commit_file(&remote, "theirs.txt", "theirs\n", "remote work");

    run_gitlet(&local, &["pull", "R", "master"]).assert().success();

    assert_eq!(read_file(&local, "mine.txt"), "mine\n");
    assert_eq!(read_file(&local, "theirs.txt"), "theirs\n");

    let log = common::gitlet_stdout(&local, &["log"]);
    assert!(log.contains("Merged R/master into master."));
}
