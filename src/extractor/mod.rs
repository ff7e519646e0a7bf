// Skill extraction on top of an external token-classification model
pub mod http;

pub use http::HttpTokenClassifier;

use crate::model::{OracleError, TaggedToken};
use crate::normalizer::{clean_skills, group_phrases};
use async_trait::async_trait;
use tracing::debug;

/// Tokenizer plus sequence-labeling model, served from outside the process.
#[async_trait]
pub trait TokenClassifier: Send + Sync {
    /// Longest token sequence `classify` accepts.
    fn max_tokens(&self) -> usize;

    async fn tokenize(&self, text: &str) -> Result<Vec<u32>, OracleError>;

    /// Decodes token ids back to text, without special tokens.
    async fn decode(&self, ids: &[u32]) -> Result<String, OracleError>;

    /// Tags text no longer than `max_tokens`.
    async fn classify(&self, text: &str) -> Result<Vec<TaggedToken>, OracleError>;
}

/// Extracts cleaned skills from text of any length.
///
/// Text longer than the model limit is tagged in consecutive token chunks. A
/// phrase straddling two chunks comes out as two fragments.
pub async fn extract_skills(
    classifier: &dyn TokenClassifier,
    text: &str,
) -> Result<Vec<String>, OracleError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let max_tokens = classifier.max_tokens().max(1);
    let ids = classifier.tokenize(text).await?;

    let mut raw = Vec::new();
    if ids.len() <= max_tokens {
        raw.extend(group_phrases(&classifier.classify(text).await?));
    } else {
        debug!(tokens = ids.len(), max_tokens, "chunking long text");
        for chunk in ids.chunks(max_tokens) {
            let chunk_text = classifier.decode(chunk).await?;
            raw.extend(group_phrases(&classifier.classify(&chunk_text).await?));
        }
    }

    Ok(clean_skills(&raw))
}
