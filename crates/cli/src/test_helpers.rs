//! Shared fixtures for the CLI unit tests.
//! Integration tests have their own in `tests/integration_test_helpers.rs`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory that is also the current directory until
/// dropped. Tests using it must be `#[serial]`.
pub struct ProjectDir {
    original_dir: PathBuf,
    // dropped after the directory change is undone
    temp_dir: TempDir,
}

impl ProjectDir {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();
        Self {
            original_dir,
            temp_dir,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write the project config file.
    pub fn write_config(&self, content: &str) {
        self.write(crate::utils::config::CONFIG_PATH, content);
    }
}

impl Drop for ProjectDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}
