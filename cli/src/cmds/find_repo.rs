use std::{env, path::Path};

use gitcas_core::repo::Result;
use gitcas_on_disk::OnDisk;

// Discover a git repo starting from the given path.
//
// This handles only the simple case where there is a `.git`
// directory directly within the given path. Parent directories,
// `GIT_DIR`, and bare repositories are not searched.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDisk> {
    OnDisk::new(path.as_ref())
}

// Discover a git repo starting from the current working directory.
#[cfg(not(tarpaulin_include))]
pub fn from_current_dir() -> Result<OnDisk> {
    let path = env::current_dir()?;
    from_path(path)
}
