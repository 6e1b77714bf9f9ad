use async_trait::async_trait;
use atelier_application::FileStore;
use atelier_core::{AppError, AppResult};
use serde::Deserialize;

use crate::http_identity_verifier::trim_base_url;

/// REST client for the external object-storage service.
pub struct HttpObjectStorage {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl HttpObjectStorage {
    /// Creates a storage client for the given endpoint.
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
impl FileStore for HttpObjectStorage {
    async fn upload(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> AppResult<String> {
        let response = self
            .http_client
            .post(format!("{}/v1/objects/{name}", self.base_url))
            .bearer_auth(self.api_key.as_str())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|error| {
                AppError::Transient(format!("object storage unreachable: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transient(format!(
                "object storage upload failed with status {status}"
            )));
        }

        let payload: UploadResponse = response.json().await.map_err(|error| {
            AppError::Internal(format!("invalid object storage response: {error}"))
        })?;

        Ok(payload.url)
    }
}
