use std::fs;

use predicates::prelude::*;

mod common;

use common::{HELLO_CONTENT, HELLO_ID};

// --- Argument checking

#[test]
fn error_multiple_stdin_args() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());

    common::gitcas(dir.path())
        .args(&["hash-object", "--stdin", "--stdin"])
        .write_stdin(b"test content\n".to_vec())
        .assert()
        .failure();
}

#[test]
fn error_stdin_and_file() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());
    fs::write(dir.path().join("hello"), HELLO_CONTENT).unwrap();

    common::gitcas(dir.path())
        .args(&["hash-object", "--stdin", "hello"])
        .write_stdin(HELLO_CONTENT.to_vec())
        .assert()
        .failure()
        .code(1)
        .stderr("ERROR: content source must be either --stdin or a file path\n");
}

#[test]
fn error_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    common::gitcas(dir.path())
        .args(&["hash-object", "no-such-file"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("ERROR: "));
}

// --- Behavior

#[test]
fn hash_file_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());
    fs::write(dir.path().join("hello"), HELLO_CONTENT).unwrap();

    common::gitcas(dir.path())
        .args(&["hash-object", "hello"])
        .assert()
        .success()
        .stdout(format!("{}\n", HELLO_ID));

    assert!(!common::object_path(dir.path(), HELLO_ID).exists());
}

#[test]
fn hash_without_repo() {
    let dir = tempfile::tempdir().unwrap();

    common::gitcas(dir.path())
        .args(&["hash-object", "--stdin"])
        .write_stdin(HELLO_CONTENT.to_vec())
        .assert()
        .success()
        .stdout(format!("{}\n", HELLO_ID));
}

#[test]
fn hash_file_and_write_to_database() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());
    fs::write(dir.path().join("hello"), HELLO_CONTENT).unwrap();

    common::gitcas(dir.path())
        .args(&["hash-object", "-w", "hello"])
        .assert()
        .success()
        .stdout(format!("{}\n", HELLO_ID));

    assert!(common::object_path(dir.path(), HELLO_ID).is_file());

    common::gitcas(dir.path())
        .args(&["cat-file", "-p", HELLO_ID])
        .assert()
        .success()
        .stdout(HELLO_CONTENT);
}

#[test]
fn write_twice() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());

    let first = common::write_object(dir.path(), "blob", HELLO_CONTENT);
    let stored = fs::read(common::object_path(dir.path(), &first)).unwrap();

    let second = common::write_object(dir.path(), "blob", HELLO_CONTENT);
    assert_eq!(first, second);
    assert_eq!(
        fs::read(common::object_path(dir.path(), &second)).unwrap(),
        stored
    );
}

#[test]
fn empty_blob() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());

    let id = common::write_object(dir.path(), "blob", b"");
    assert_eq!(id, "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
}

#[test]
fn corrupt_tree_rejected_unless_literally() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());

    common::gitcas(dir.path())
        .args(&["hash-object", "-t", "tree", "--stdin"])
        .write_stdin(b"junk".to_vec())
        .assert()
        .failure()
        .stderr("ERROR: corrupt tree\n");

    common::gitcas(dir.path())
        .args(&["hash-object", "-t", "tree", "--literally", "--stdin"])
        .write_stdin(b"junk".to_vec())
        .assert()
        .success();
}
