use crate::model::ScraperError;
use serde_json::Value;

/// Yields the raw dataset items of one job board run.
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<Value>, ScraperError>;
}
