//! Session issuance and verification against the external identity provider.
//!
//! The credential handled here is opaque to this service: it is minted and
//! validated by the identity provider, and this service only fixes the
//! lifetime policy and the client-visible error shape.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use atelier_core::{AppError, AppResult};
use tracing::warn;

/// Session lifetime in seconds, also set as the cookie `Max-Age`.
pub const SESSION_TTL_SECONDS: u64 = 5 * 24 * 60 * 60;

/// Fixed validity window for a session credential: five days.
pub const SESSION_TTL: Duration = Duration::from_secs(SESSION_TTL_SECONDS);

/// Decoded claims returned by the identity provider for a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    /// Opaque subject identifier of the authenticated user.
    pub uid: String,
}

/// Port to the external identity provider.
///
/// Only this boundary talks to the provider; nothing in the application
/// mints or decodes credentials itself.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Exchanges a short-lived identity token for a long-lived session
    /// credential with the given validity window.
    async fn create_session_cookie(
        &self,
        id_token: &str,
        expires_in: Duration,
    ) -> AppResult<String>;

    /// Validates a session credential, optionally checking whether it has
    /// been revoked since issuance.
    async fn verify_session_cookie(
        &self,
        credential: &str,
        check_revoked: bool,
    ) -> AppResult<VerifiedSession>;

    /// Revokes every outstanding session credential for the subject.
    async fn revoke_sessions(&self, uid: &str) -> AppResult<()>;
}

/// An issued credential plus the cookie lifetime the caller must apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    /// Opaque credential value to store in the session cookie.
    pub value: String,
    /// Cookie `Max-Age` in seconds.
    pub max_age_seconds: u64,
}

/// Application service owning the session credential lifecycle.
#[derive(Clone)]
pub struct SessionService {
    verifier: Arc<dyn IdentityVerifier>,
}

impl SessionService {
    /// Creates a session service over an identity provider client.
    #[must_use]
    pub fn new(verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { verifier }
    }

    /// Exchanges a recently-issued identity token for a session credential.
    ///
    /// Every failure cause (invalid token, expired token, provider
    /// unreachable) collapses into the same authentication error so the
    /// client cannot distinguish them; the cause is logged here and never
    /// returned.
    pub async fn create_session(&self, id_token: &str) -> AppResult<SessionCredential> {
        match self
            .verifier
            .create_session_cookie(id_token, SESSION_TTL)
            .await
        {
            Ok(value) => Ok(SessionCredential {
                value,
                max_age_seconds: SESSION_TTL_SECONDS,
            }),
            Err(error) => {
                warn!(%error, "session creation rejected");
                Err(AppError::Unauthenticated(
                    "invalid authentication token".to_owned(),
                ))
            }
        }
    }

    /// Validates a credential read from the session cookie, with revocation
    /// checking, and returns the subject identifier.
    ///
    /// Missing, malformed, expired, and revoked credentials all map to
    /// "unauthenticated", never to a server fault.
    pub async fn verify_session(&self, credential: &str) -> AppResult<String> {
        match self.verifier.verify_session_cookie(credential, true).await {
            Ok(verified) => Ok(verified.uid),
            Err(error) => {
                warn!(%error, "session verification rejected");
                Err(AppError::Unauthenticated(
                    "session is invalid or expired".to_owned(),
                ))
            }
        }
    }

    /// Revokes every session for the subject, used on logout.
    pub async fn revoke_sessions(&self, uid: &str) -> AppResult<()> {
        self.verifier.revoke_sessions(uid).await
    }
}
