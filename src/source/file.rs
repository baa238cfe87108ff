use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use super::DataSource;
use crate::config::Config;

/// Reads the dataset from a local path; used for offline reports and tests.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(cfg: &Config) -> Self {
        Self {
            path: PathBuf::from(
                cfg.source_path
                    .clone()
                    .unwrap_or_else(|| "data/intensity.csv".to_string()),
            ),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_body(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        let source = FileSource::at(&path);
        assert_eq!(source.fetch_body().await.unwrap(), "a,b\n1,2\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = FileSource::at("/nonexistent/intensity.csv");
        let err = source.fetch_body().await.unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
