// HTTP client for the token-classification inference service
use super::TokenClassifier;
use crate::config::ClassifierConfig;
use crate::model::{OracleError, TaggedToken};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct DecodeRequest<'a> {
    input_ids: &'a [u32],
    skip_special_tokens: bool,
}

#[derive(Deserialize)]
struct TokenizeResponse {
    input_ids: Vec<u32>,
}

#[derive(Deserialize)]
struct DecodeResponse {
    text: String,
}

/// Talks to a service exposing `/tokenize`, `/decode` and `/classify`.
pub struct HttpTokenClassifier {
    client: Client,
    endpoint: String,
    max_tokens: usize,
}

impl HttpTokenClassifier {
    pub fn new(cfg: &ClassifierConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .user_agent(concat!("skill-radar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            max_tokens: cfg.max_tokens,
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.endpoint, route)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<T, OracleError> {
        let response = self.client.post(self.url(route)).json(body).send().await?;
        decode_json(response).await
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, OracleError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(OracleError::Status {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| OracleError::Malformed(e.to_string()))
}

#[async_trait]
impl TokenClassifier for HttpTokenClassifier {
    fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    async fn tokenize(&self, text: &str) -> Result<Vec<u32>, OracleError> {
        let resp: TokenizeResponse = self.post("tokenize", &TextRequest { text }).await?;
        Ok(resp.input_ids)
    }

    async fn decode(&self, ids: &[u32]) -> Result<String, OracleError> {
        let req = DecodeRequest {
            input_ids: ids,
            skip_special_tokens: true,
        };
        let resp: DecodeResponse = self.post("decode", &req).await?;
        Ok(resp.text)
    }

    async fn classify(&self, text: &str) -> Result<Vec<TaggedToken>, OracleError> {
        self.post("classify", &TextRequest { text }).await
    }
}
