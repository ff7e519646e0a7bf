use super::JobSource;
use crate::model::ScraperError;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

const APIFY_API: &str = "https://api.apify.com/v2";

/// Runs an Apify actor synchronously and returns its dataset items.
pub struct ApifySource {
    client: Client,
    actor_id: String,
    token: String,
    input: Value,
}

impl ApifySource {
    pub fn new(actor_id: &str, token: &str, input: Value) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(concat!("skill-radar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            actor_id: actor_id.to_string(),
            token: token.to_string(),
            input,
        })
    }

    fn build_url(&self) -> String {
        // Actor ids in "user/name" form are addressed as "user~name".
        format!(
            "{}/acts/{}/run-sync-get-dataset-items",
            APIFY_API,
            self.actor_id.replace('/', "~")
        )
    }
}

#[async_trait::async_trait]
impl JobSource for ApifySource {
    async fn fetch_items(&self) -> Result<Vec<Value>, ScraperError> {
        let url = self.build_url();
        info!(actor = %self.actor_id, "Running actor...");

        let input = if self.input.is_null() {
            Value::Object(Default::default())
        } else {
            self.input.clone()
        };

        let response = self
            .client
            .post(&url)
            .query(&[("token", self.token.as_str())])
            .json(&input)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse(format!("{}: {}", status, body)));
        }

        parse_items(&body)
    }
}

pub(crate) fn parse_items(body: &str) -> Result<Vec<Value>, ScraperError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => Ok(items),
        other => Err(ScraperError::InvalidResponse(format!(
            "expected an array of items, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
