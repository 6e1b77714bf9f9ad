use atelier_core::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http_identity_verifier::trim_base_url;

/// REST client for the external document database.
///
/// The store is schemaless from this side: documents are addressed by
/// `(collection, id)` and exchanged as JSON. Typed repositories wrap this
/// client per collection.
#[derive(Clone)]
pub struct DocumentStoreClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(serde::Deserialize)]
struct DocumentListResponse<T> {
    documents: Vec<T>,
}

impl DocumentStoreClient {
    /// Creates a client for the given store endpoint.
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

    /// Fetches one document, or `None` when the store reports 404.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> AppResult<Option<T>> {
        let response = self
            .http_client
            .get(self.document_url(collection, id))
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(unreachable_store)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = failed_store_response(collection, response).await?;
        let document = response
            .json::<T>()
            .await
            .map_err(|error| AppError::Internal(format!("invalid document payload: {error}")))?;

        Ok(Some(document))
    }

    /// Creates or replaces one document.
    pub async fn put_document<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> AppResult<()> {
        let response = self
            .http_client
            .put(self.document_url(collection, id))
            .bearer_auth(self.api_key.as_str())
            .json(document)
            .send()
            .await
            .map_err(unreachable_store)?;

        failed_store_response(collection, response).await?;
        debug!(collection, id, "document stored");
        Ok(())
    }

    /// Deletes one document. Deleting a missing document is not an error.
    pub async fn delete_document(&self, collection: &str, id: &str) -> AppResult<()> {
        let response = self
            .http_client
            .delete(self.document_url(collection, id))
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(unreachable_store)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        failed_store_response(collection, response).await?;
        Ok(())
    }

    /// Lists every document in a collection.
    pub async fn list_documents<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        let response = self
            .http_client
            .get(format!(
                "{}/v1/collections/{collection}/documents",
                self.base_url
            ))
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(unreachable_store)?;

        let response = failed_store_response(collection, response).await?;
        let payload = response
            .json::<DocumentListResponse<T>>()
            .await
            .map_err(|error| AppError::Internal(format!("invalid document payload: {error}")))?;

        Ok(payload.documents)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/v1/collections/{collection}/documents/{id}",
            self.base_url
        )
    }
}

fn unreachable_store(error: reqwest::Error) -> AppError {
    AppError::Transient(format!("document store unreachable: {error}"))
}

/// Maps a non-success store response onto the error taxonomy.
async fn failed_store_response(
    collection: &str,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<no error detail>")
            .to_owned(),
        Err(_) => "<response body unavailable>".to_owned(),
    };

    if status.is_server_error() {
        return Err(AppError::Transient(format!(
            "document store failed on collection '{collection}' with status {status}: {detail}"
        )));
    }

    Err(AppError::Internal(format!(
        "document store rejected collection '{collection}' with status {status}: {detail}"
    )))
}
