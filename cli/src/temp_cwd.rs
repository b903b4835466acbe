use std::{
    env,
    path::{Path, PathBuf},
};

// Changes the current working directory of the test process
// until dropped, then restores the previous one.
//
// The working directory is process-wide, so every test that
// uses this must be marked #[serial].
pub(crate) struct TempCwd {
    old_path: PathBuf,
}

impl TempCwd {
    pub fn new<P: AsRef<Path>>(path: P) -> TempCwd {
        let old_path = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { old_path }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.old_path).unwrap();
    }
}
