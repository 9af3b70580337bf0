use crate::store::fs::FileBlogStore;
use crate::store::BlogProvider;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileBlogStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    /// Fresh, initialised file store in a temp directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("blog");
        let store = FileBlogStore::open(root.clone());
        store.initialise().expect("failed to initialise store");
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// A second store over the same directory, as after a restart.
    pub fn reopen(&self) -> FileBlogStore {
        let store = FileBlogStore::open(self.root.clone());
        store.initialise().expect("failed to initialise store");
        store
    }
}
