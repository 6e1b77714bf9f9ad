use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use atelier_application::{IdentityVerifier, VerifiedSession};
use atelier_core::{AppError, AppResult};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory identity provider for development and tests.
///
/// Identity tokens must be registered up front (the dev seed does this);
/// session credentials are random opaque values tracked with an expiry and
/// a revocation flag, mirroring the real provider's semantics.
#[derive(Debug, Default)]
pub struct InMemoryIdentityVerifier {
    id_tokens: RwLock<HashMap<String, String>>,
    sessions: RwLock<HashMap<String, IssuedSession>>,
}

#[derive(Debug, Clone)]
struct IssuedSession {
    uid: String,
    expires_at: DateTime<Utc>,
    revoked: bool,
}

impl InMemoryIdentityVerifier {
    /// Creates an empty verifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity token for a subject.
    pub async fn register_id_token(&self, id_token: impl Into<String>, uid: impl Into<String>) {
        self.id_tokens
            .write()
            .await
            .insert(id_token.into(), uid.into());
    }
}

#[async_trait]
impl IdentityVerifier for InMemoryIdentityVerifier {
    async fn create_session_cookie(
        &self,
        id_token: &str,
        expires_in: Duration,
    ) -> AppResult<String> {
        let uid = self
            .id_tokens
            .read()
            .await
            .get(id_token)
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("unknown identity token".to_owned()))?;

        let expires_in = chrono::Duration::from_std(expires_in)
            .map_err(|error| AppError::Internal(format!("invalid session lifetime: {error}")))?;
        let credential = Uuid::new_v4().simple().to_string();

        self.sessions.write().await.insert(
            credential.clone(),
            IssuedSession {
                uid,
                expires_at: Utc::now() + expires_in,
                revoked: false,
            },
        );

        Ok(credential)
    }

    async fn verify_session_cookie(
        &self,
        credential: &str,
        check_revoked: bool,
    ) -> AppResult<VerifiedSession> {
        let session = self
            .sessions
            .read()
            .await
            .get(credential)
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("unknown session credential".to_owned()))?;

        if session.expires_at <= Utc::now() {
            return Err(AppError::Unauthenticated(
                "session credential expired".to_owned(),
            ));
        }

        if check_revoked && session.revoked {
            return Err(AppError::Unauthenticated(
                "session credential revoked".to_owned(),
            ));
        }

        Ok(VerifiedSession { uid: session.uid })
    }

    async fn revoke_sessions(&self, uid: &str) -> AppResult<()> {
        for session in self.sessions.write().await.values_mut() {
            if session.uid == uid {
                session.revoked = true;
            }
        }

        Ok(())
    }
}
