use async_trait::async_trait;
use atelier_application::CompletionClient;
use atelier_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::http_identity_verifier::trim_base_url;

/// REST client for the external language-model completion API.
pub struct HttpCompletionClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    text: String,
}

impl HttpCompletionClient {
    /// Creates a completion client for the given endpoint.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: trim_base_url(base_url.into()),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(format!("{}/v1/completions", self.base_url))
            .bearer_auth(self.api_key.as_str())
            .json(&CompletionRequest { prompt })
            .send()
            .await
            .map_err(|error| {
                AppError::Transient(format!("completion API unreachable: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transient(format!(
                "completion API failed with status {status}"
            )));
        }

        let payload: CompletionResponse = response.json().await.map_err(|error| {
            AppError::Internal(format!("invalid completion API response: {error}"))
        })?;

        Ok(payload.text)
    }
}
