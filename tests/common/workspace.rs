use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding posts to convert
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create a new temporary workspace
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("wp2md-test")
            .tempdir()
            .expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Read a file back, panicking when it does not exist
    pub fn read_file(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Get workspace root path
    pub fn root_path(&self) -> &Path {
        self.dir.path()
    }
}
