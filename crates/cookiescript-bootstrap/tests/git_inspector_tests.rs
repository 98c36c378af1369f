//! Integration tests for the git-backed repository inspector
//!
//! These tests create throwaway repositories and require git on PATH; they
//! are skipped when git is not installed.

use std::process::Command;

use camino::Utf8Path;
use cookiescript_bootstrap::provenance::check_directory;
use cookiescript_bootstrap::{
    CommandRunner, ErrorKind, GitInspector, RepositoryInspector, SystemRunner,
};
use tempfile::TempDir;

/// Skip test if git is not installed
fn skip_if_no_git(runner: &SystemRunner) -> bool {
    if !runner.is_available("git") {
        eprintln!("Skipping test: git not installed");
        true
    } else {
        false
    }
}

fn git(dir: &Utf8Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("git should run");
    assert!(status.success(), "git {:?} failed", args);
}

fn init_repo(remote: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8Path::from_path(temp_dir.path()).unwrap();
    git(path, &["init", "--quiet"]);
    if let Some(url) = remote {
        git(path, &["remote", "add", "origin", url]);
    }
    temp_dir
}

#[test]
fn test_lists_remotes_of_template_clone() {
    let runner = SystemRunner::new();
    if skip_if_no_git(&runner) {
        return;
    }

    let repo = init_repo(Some("https://github.com/getspooky/CookieScript.git"));
    let path = Utf8Path::from_path(repo.path()).unwrap();

    let lines = GitInspector::in_dir(&runner, path).remote_lines().unwrap();
    assert_eq!(lines.len(), 2, "fetch and push entries: {:?}", lines);

    let remote = check_directory(&runner, path).expect("template clone should pass");
    assert!(remote.starts_with("origin"));
    assert!(remote.contains("getspooky/CookieScript.git"));
}

#[test]
fn test_foreign_clone_fails() {
    let runner = SystemRunner::new();
    if skip_if_no_git(&runner) {
        return;
    }

    let repo = init_repo(Some("https://github.com/someone/other.git"));
    let path = Utf8Path::from_path(repo.path()).unwrap();

    let err = check_directory(&runner, path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provenance);
}

#[test]
fn test_repository_without_remotes_fails() {
    let runner = SystemRunner::new();
    if skip_if_no_git(&runner) {
        return;
    }

    let repo = init_repo(None);
    let path = Utf8Path::from_path(repo.path()).unwrap();

    let err = check_directory(&runner, path).unwrap_err();
    assert_eq!(err.detail(), Some("no remotes configured"));
}

#[test]
fn test_not_a_repository_fails() {
    let runner = SystemRunner::new();
    if skip_if_no_git(&runner) {
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let path = Utf8Path::from_path(temp_dir.path()).unwrap();

    let err = check_directory(&runner, path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provenance);
    assert!(err.detail().unwrap().starts_with("failed to list remotes"));
}
