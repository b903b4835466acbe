use std::fs;

use predicates::prelude::*;

mod common;

#[test]
fn init_current_dir() {
    let dir = tempfile::tempdir().unwrap();

    common::gitcas(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty Git repository in ",
        ))
        .stdout(predicate::str::ends_with(".git\n"))
        .stderr("");

    let git_dir = dir.path().join(".git");
    assert_eq!(
        fs::read_to_string(git_dir.join("HEAD")).unwrap(),
        "ref: refs/heads/main\n"
    );
    assert!(git_dir.join("config").is_file());
    assert!(git_dir.join("objects/info").is_dir());
    assert!(git_dir.join("objects/pack").is_dir());
    assert!(git_dir.join("refs/heads").is_dir());
    assert!(git_dir.join("refs/tags").is_dir());
}

#[test]
fn init_named_dir() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("nested/repo");

    common::gitcas(dir.path())
        .arg("init")
        .arg(&repo)
        .assert()
        .success();

    assert!(repo.join(".git/HEAD").is_file());
}

#[test]
fn two_inits_match() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();

    common::init_empty_repo(a.path());
    common::init_empty_repo(b.path());

    assert!(!dir_diff::is_different(a.path(), b.path()).unwrap());
}

#[test]
fn error_reinit() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());

    common::gitcas(dir.path())
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("ERROR: git dir shouldn't exist"));
}
