//! This crate implements the core data model for a content-addressed
//! git object store: object IDs, the canonical object encoding, the
//! compression framing used at rest, and the binary tree format.
//!
//! Nothing in this crate touches the file system. See the `gitcas_on_disk`
//! crate for a repository that stores loose objects on local disk.

pub mod compress;
pub mod object;
pub mod path;
pub mod repo;
