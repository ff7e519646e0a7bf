// Item feeds: Apify actor runs and local JSON dumps
pub mod apify;
pub mod file;
pub mod traits;

pub use apify::ApifySource;
pub use file::FileSource;
pub use traits::JobSource;

use crate::config::SourceConfig;
use crate::model::ScraperError;

/// Builds the feed a configured source points at.
pub fn from_config(cfg: &SourceConfig, apify_token: Option<&str>) -> Result<Box<dyn JobSource>, ScraperError> {
    if let Some(path) = &cfg.file {
        return Ok(Box::new(FileSource::new(path)));
    }
    let actor_id = cfg
        .actor_id
        .as_deref()
        .ok_or_else(|| ScraperError::InvalidResponse(format!("source '{}' has no origin", cfg.name)))?;
    let token = apify_token.ok_or_else(|| ScraperError::MissingToken(cfg.name.clone()))?;
    Ok(Box::new(ApifySource::new(actor_id, token, cfg.input.clone())?))
}
