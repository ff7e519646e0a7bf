use super::JobSource;
use super::apify::parse_items;
use crate::model::ScraperError;
use serde_json::Value;
use std::path::PathBuf;

/// Reads a dataset export (a JSON array of items) from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl JobSource for FileSource {
    async fn fetch_items(&self) -> Result<Vec<Value>, ScraperError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_items(&body)
    }
}
