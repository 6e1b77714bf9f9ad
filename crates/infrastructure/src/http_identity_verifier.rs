use std::time::Duration;

use async_trait::async_trait;
use atelier_application::{IdentityVerifier, VerifiedSession};
use atelier_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// REST client for the external identity provider.
///
/// The provider is the source of record for credentials; this adapter only
/// moves bytes and maps failures onto the application error taxonomy.
pub struct HttpIdentityVerifier {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionCookieRequest<'a> {
    id_token: &'a str,
    expires_in_ms: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionCookieResponse {
    session_cookie: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifySessionCookieRequest<'a> {
    session_cookie: &'a str,
    check_revoked: bool,
}

#[derive(Deserialize)]
struct VerifySessionCookieResponse {
    uid: String,
}

#[derive(Serialize)]
struct RevokeSessionsRequest<'a> {
    uid: &'a str,
}

impl HttpIdentityVerifier {
    /// Creates a verifier client for the given provider endpoint.
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

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> AppResult<reqwest::Response> {
        let response = self
            .http_client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(self.api_key.as_str())
            .json(body)
            .send()
            .await
            .map_err(|error| {
                AppError::Transient(format!("identity provider unreachable: {error}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = provider_error_detail(response).await;
        if status.is_server_error() {
            return Err(AppError::Transient(format!(
                "identity provider returned status {status}: {detail}"
            )));
        }

        Err(AppError::Unauthenticated(format!(
            "identity provider rejected the request with status {status}: {detail}"
        )))
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn create_session_cookie(
        &self,
        id_token: &str,
        expires_in: Duration,
    ) -> AppResult<String> {
        let response = self
            .post_json(
                "/v1/sessions",
                &CreateSessionCookieRequest {
                    id_token,
                    expires_in_ms: expires_in.as_millis() as u64,
                },
            )
            .await?;

        let payload: CreateSessionCookieResponse = response.json().await.map_err(|error| {
            AppError::Internal(format!("invalid identity provider response: {error}"))
        })?;

        Ok(payload.session_cookie)
    }

    async fn verify_session_cookie(
        &self,
        credential: &str,
        check_revoked: bool,
    ) -> AppResult<VerifiedSession> {
        let response = self
            .post_json(
                "/v1/sessions/verify",
                &VerifySessionCookieRequest {
                    session_cookie: credential,
                    check_revoked,
                },
            )
            .await?;

        let payload: VerifySessionCookieResponse = response.json().await.map_err(|error| {
            AppError::Internal(format!("invalid identity provider response: {error}"))
        })?;

        Ok(VerifiedSession { uid: payload.uid })
    }

    async fn revoke_sessions(&self, uid: &str) -> AppResult<()> {
        self.post_json("/v1/sessions/revoke", &RevokeSessionsRequest { uid })
            .await?;
        Ok(())
    }
}

/// Extracts the provider's error message for server-side logs.
async fn provider_error_detail(response: reqwest::Response) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<no error detail>")
            .to_owned(),
        Err(_) => "<response body unavailable>".to_owned(),
    }
}

pub(crate) fn trim_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }

    base_url
}

#[cfg(test)]
mod tests {
    use super::trim_base_url;

    #[test]
    fn base_url_loses_trailing_slashes() {
        assert_eq!(
            trim_base_url("https://id.example/".to_owned()),
            "https://id.example"
        );
        assert_eq!(
            trim_base_url("https://id.example".to_owned()),
            "https://id.example"
        );
    }
}
