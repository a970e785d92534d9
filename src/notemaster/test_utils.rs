use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

/// A filesystem backend rooted in a fresh temporary directory.
pub struct TestEnv {
    _temp_dir: TempDir,
    pub backend: FsBackend,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().join("data");
        Self {
            backend: FsBackend::new(root.clone()),
            root,
            _temp_dir: temp_dir,
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
