//! This crate provides a git object store that keeps loose objects on the
//! local file system.
//!
//! It intentionally uses the same `.git` folder format as command-line git,
//! so objects written here can be read by `git cat-file` and vice versa.

mod on_disk_repo;
pub use on_disk_repo::OnDisk;
