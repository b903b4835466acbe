use predicates::prelude::*;

mod common;

use common::{EMPTY_TREE_ID, HELLO_CONTENT, HELLO_ID};

const LISTING_TEMPLATE: &str = "100644 blob {blob}\thello.txt\n\
                                040000 tree {tree}\tsub\n\
                                100755 blob {blob}\trun.sh\n";

fn listing() -> String {
    LISTING_TEMPLATE
        .replace("{blob}", HELLO_ID)
        .replace("{tree}", EMPTY_TREE_ID)
}

fn repo_with_tree(path: &std::path::Path) -> String {
    common::init_empty_repo(path);
    common::write_object(path, "blob", HELLO_CONTENT);
    common::write_object(path, "tree", b"");

    let output = common::gitcas(path)
        .arg("mktree")
        .write_stdin(listing())
        .output()
        .unwrap();
    assert!(output.status.success());

    let mut id = String::from_utf8(output.stdout).unwrap();
    id.pop();
    id
}

#[test]
fn full_listing_is_canonically_ordered() {
    let dir = tempfile::tempdir().unwrap();
    let tree = repo_with_tree(dir.path());

    let expected = format!(
        "100644 blob {blob}\thello.txt\n\
         100755 blob {blob}\trun.sh\n\
         040000 tree {tree}\tsub\n",
        blob = HELLO_ID,
        tree = EMPTY_TREE_ID
    );

    common::gitcas(dir.path())
        .args(&["ls-tree", tree.as_str()])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn name_only() {
    let dir = tempfile::tempdir().unwrap();
    let tree = repo_with_tree(dir.path());

    common::gitcas(dir.path())
        .args(&["ls-tree", "--name-only", tree.as_str()])
        .assert()
        .success()
        .stdout("hello.txt\nrun.sh\nsub\n");
}

#[test]
fn nested_tree() {
    let dir = tempfile::tempdir().unwrap();
    let inner = repo_with_tree(dir.path());

    let outer = common::gitcas(dir.path())
        .arg("mktree")
        .write_stdin(format!("040000 tree {}\tinner\n", inner))
        .output()
        .unwrap();
    assert!(outer.status.success());
    let outer = String::from_utf8(outer.stdout).unwrap();

    common::gitcas(dir.path())
        .args(&["ls-tree", outer.trim_end()])
        .assert()
        .success()
        .stdout(format!("040000 tree {}\tinner\n", inner));
}

#[test]
fn not_a_tree() {
    let dir = tempfile::tempdir().unwrap();
    common::init_empty_repo(dir.path());
    common::write_object(dir.path(), "blob", HELLO_CONTENT);

    common::gitcas(dir.path())
        .args(&["ls-tree", HELLO_ID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a blob, not a tree"));
}
