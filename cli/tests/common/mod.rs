#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub const HELLO_CONTENT: &[u8] = b"Hello World";
pub const HELLO_ID: &str = "5e1c309dae7f45e0f39b1bf3ac3cd9db12e7d689";

pub const EMPTY_TREE_ID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

// Returns a command that runs the gitcas binary in `path`.
pub fn gitcas(path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitcas").unwrap();
    cmd.current_dir(path);
    cmd
}

pub fn init_empty_repo(path: &Path) {
    gitcas(path).arg("init").assert().success();
}

// Writes `content` as an object of the given type and returns its ID.
pub fn write_object(path: &Path, kind: &str, content: &[u8]) -> String {
    let output = gitcas(path)
        .args(&["hash-object", "-w", "-t", kind, "--stdin"])
        .write_stdin(content.to_vec())
        .output()
        .unwrap();

    assert!(output.status.success());

    let mut id = String::from_utf8(output.stdout).unwrap();
    assert_eq!(id.pop(), Some('\n'));
    id
}

pub fn object_path(path: &Path, id: &str) -> std::path::PathBuf {
    path.join(".git/objects").join(&id[..2]).join(&id[2..])
}
