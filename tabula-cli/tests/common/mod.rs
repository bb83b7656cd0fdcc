#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn create_file(&self, relative_path: &str, content: &[u8]) -> PathBuf {
        let file_path = self.temp_dir.path().join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        let file_path = self.temp_dir.path().join(relative_path);
        fs::read_to_string(&file_path).expect("Failed to read file")
    }

    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.temp_dir.path().join(relative_path).exists()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
