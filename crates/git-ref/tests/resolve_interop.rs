//! Integration tests: resolve branches created by C git.
//!
//! Skipped when no `git` executable is on PATH.

use std::path::Path;
use std::process::{Command, Stdio};

use git_ref::{FilesRefStore, RefError, RefName};

fn have_git() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Create a repository with one commit and return (tempdir, git_dir).
fn setup_git_repo() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["commit", "--quiet", "--allow-empty", "-m", "initial commit"]);
    let git_dir = dir.path().join(".git");
    (dir, git_dir)
}

#[test]
fn branch_head_matches_rev_parse() {
    if !have_git() {
        return;
    }
    let (dir, git_dir) = setup_git_repo();
    git(dir.path(), &["branch", "feature/x"]);

    let store = FilesRefStore::new(&git_dir);
    let expected = git(dir.path(), &["rev-parse", "refs/heads/feature/x"]);
    assert_eq!(store.branch_head("feature/x").unwrap().to_hex(), expected);
}

#[test]
fn head_symref_resolves_to_current_branch() {
    if !have_git() {
        return;
    }
    let (dir, git_dir) = setup_git_repo();

    let store = FilesRefStore::new(&git_dir);
    let head = RefName::new("HEAD").unwrap();
    let expected = git(dir.path(), &["rev-parse", "HEAD"]);
    assert_eq!(store.resolve_to_oid(&head).unwrap().unwrap().to_hex(), expected);

    let current = git(dir.path(), &["symbolic-ref", "--short", "HEAD"]);
    assert_eq!(store.branch_head(&current).unwrap().to_hex(), expected);
}

#[test]
fn deleted_branch_is_not_found() {
    if !have_git() {
        return;
    }
    let (dir, git_dir) = setup_git_repo();
    git(dir.path(), &["branch", "temp"]);
    git(dir.path(), &["branch", "-D", "temp"]);

    let store = FilesRefStore::new(&git_dir);
    let err = store.branch_head("temp").unwrap_err();
    assert!(matches!(err, RefError::BranchNotFound { .. }));
}
