use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Job board an item feed comes from; decides how item fields are mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Indeed,
    LinkedIn,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub provider: Provider,
    /// Apify actor to run; mutually exclusive with `file`.
    #[serde(default)]
    pub actor_id: Option<String>,
    /// Local JSON array of items.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Actor run input, passed through untouched.
    #[serde(default)]
    pub input: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_classifier_endpoint(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Reject pay amounts too small for their period instead of annualizing them.
    #[serde(default = "default_strict_salary_check")]
    pub strict_salary_check: bool,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    pub sources: Vec<SourceConfig>,
    #[serde(skip)]
    pub apify_token: Option<String>,
}

fn default_database_path() -> String {
    "jobs.db".to_string()
}
fn default_strict_salary_check() -> bool {
    true
}
fn default_classifier_endpoint() -> String {
    "http://localhost:8080".to_string()
}
fn default_max_tokens() -> usize {
    512
}

impl AppConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        for source in &config.sources {
            if source.actor_id.is_some() == source.file.is_some() {
                return Err(ConfigError::InvalidSource(source.name.clone()));
            }
        }
        Ok(config)
    }

    /// Applies `APIFY_TOKEN`, `SKILL_RADAR_DB` and `SKILL_RADAR_CLASSIFIER`.
    pub fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(token) = lookup("APIFY_TOKEN").filter(|t| !t.is_empty()) {
            self.apify_token = Some(token);
        }
        if let Some(path) = lookup("SKILL_RADAR_DB") {
            self.database_path = path;
        }
        if let Some(endpoint) = lookup("SKILL_RADAR_CLASSIFIER") {
            self.classifier.endpoint = endpoint;
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = AppConfig::from_json(&content)?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}
