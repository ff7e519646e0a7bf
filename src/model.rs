// Core structs: JobRecord, RawJobItem, TaggedToken, run summaries, error types
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Textual format of the `Date` field on the wire and in storage.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Separator used when skills are flattened into the `Skills` field.
pub const SKILL_SEPARATOR: &str = ", ";

/// Canonical job posting as persisted in the document store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Date", with = "wire_date", default)]
    pub posted_date: Option<NaiveDate>,
    #[serde(rename = "Salary", default)]
    pub salary_annual: Option<u64>,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Skills", with = "wire_skills", default)]
    pub skills: Vec<String>,
}

impl JobRecord {
    /// `Date` as stored: `dd-mm-yyyy`.
    pub fn date_field(&self) -> Option<String> {
        self.posted_date.map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// `Skills` as stored: comma-and-space joined, `None` when empty.
    pub fn skills_field(&self) -> Option<String> {
        join_skills(&self.skills)
    }
}

pub fn join_skills(skills: &[String]) -> Option<String> {
    if skills.is_empty() {
        None
    } else {
        Some(skills.join(SKILL_SEPARATOR))
    }
}

pub fn split_skills(field: Option<&str>) -> Vec<String> {
    field
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_date_field(field: Option<&str>) -> Option<NaiveDate> {
    field.and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
}

mod wire_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format(DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(parse_date_field(raw.as_deref()))
    }
}

mod wire_skills {
    use super::*;

    pub fn serialize<S: Serializer>(skills: &[String], s: S) -> Result<S::Ok, S::Error> {
        match join_skills(skills) {
            Some(joined) => s.serialize_some(&joined),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(split_skills(raw.as_deref()))
    }
}

/// A record read back from the store together with its row id.
#[derive(Debug, Clone)]
pub struct StoredJob {
    pub id: i64,
    pub record: JobRecord,
}

/// Provider-neutral scraped posting, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawJobItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub posted: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
}

/// One aggregated sub-token span emitted by the token-classification model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaggedToken {
    pub entity_group: String,
    pub word: String,
}

impl TaggedToken {
    pub fn new(entity_group: &str, word: &str) -> Self {
        Self {
            entity_group: entity_group.to_string(),
            word: word.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub processed: usize,
    pub inserted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillSummary {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("source '{0}' must set exactly one of actor_id or file")]
    InvalidSource(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("failed to read items: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode items: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("missing APIFY_TOKEN for source '{0}'")]
    MissingToken(String),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("item is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("classifier request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("classifier returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed classifier output: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("record {0} not found")]
    NotFound(i64),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
