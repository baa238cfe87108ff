//! Raw dataset sources: where the delimited text comes from.
//!
//! The loader only ever sees a `DataSource`; fetching a remote file, reading
//! a local one, and serving a fixed body for tests all go through the same
//! seam.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;

pub mod file;
pub mod http;
pub mod retry;

pub use file::FileSource;
pub use http::HttpSource;

/// A fetchable origin for the raw dataset body.
#[async_trait]
pub trait DataSource {
    /// Human-readable origin, used in logs and the manifest.
    fn describe(&self) -> String;
    async fn fetch_body(&self) -> Result<String>;
}

#[derive(Clone, Copy, Debug)]
pub enum SourceKind {
    Http,
    File,
}

impl SourceKind {
    pub fn from_env() -> Self {
        match std::env::var("DATA_SOURCE").unwrap_or_else(|_| "http".to_string()).as_str() {
            "file" => SourceKind::File,
            _ => SourceKind::Http,
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn DataSource + Send + Sync>> {
        match self {
            SourceKind::Http => Ok(Box::new(HttpSource::new(cfg)?)),
            SourceKind::File => Ok(Box::new(FileSource::new(cfg))),
        }
    }
}

/// Fixed in-memory source: either a canned body or a canned failure.
/// Used by offline tools and tests to exercise the loader without I/O.
pub struct StaticSource {
    body: Result<String, String>,
}

impl StaticSource {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { body: Ok(body.into()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { body: Err(message.into()) }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch_body(&self) -> Result<String> {
        match &self.body {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
