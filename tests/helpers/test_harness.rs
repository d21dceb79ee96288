use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use autoimport::config::IndexerConfig;
use autoimport::{IndexReport, ProjectIndexer};

/// Temporary Python project for integration tests
pub struct TestHarness {
    pub temp_dir: TempDir,
    pub config: IndexerConfig,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            config: IndexerConfig::default(),
        })
    }

    pub fn create_test_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        self.create_raw_file(path, content.as_bytes())
    }

    pub fn create_raw_file(&self, path: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    pub fn index(&self) -> Result<IndexReport> {
        Ok(ProjectIndexer::new(self.config.clone()).index(self.path())?)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
