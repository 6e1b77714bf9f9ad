//! Resolution of inbound requests to an authenticated identity.

use std::sync::Arc;

use atelier_core::{AppError, AppResult};
use atelier_domain::Identity;
use tracing::warn;

use crate::session_service::SessionService;
use crate::user_directory::ProfileRepository;

/// Outcome of resolving a request's session cookie.
///
/// Distinct from a transient failure: an unreachable profile store is an
/// error, not an unauthenticated caller, and must not trigger a login
/// redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A verified credential backed by a stored profile.
    Authenticated(Identity),
    /// No credential, a rejected credential, or a missing profile.
    Unauthenticated,
}

/// Resolves the session cookie of an inbound request to `(uid, role)`.
#[derive(Clone)]
pub struct SessionResolver {
    sessions: SessionService,
    profiles: Arc<dyn ProfileRepository>,
}

impl SessionResolver {
    /// Creates a resolver over the session service and the profile store.
    #[must_use]
    pub fn new(sessions: SessionService, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { sessions, profiles }
    }

    /// Resolves an optional cookie value to an identity.
    ///
    /// An absent cookie short-circuits to `Unauthenticated` without
    /// contacting the identity provider. A verified subject with no stored
    /// profile also resolves to `Unauthenticated`; no role is ever
    /// defaulted. Transient profile-store failures propagate as errors.
    pub async fn resolve(&self, cookie: Option<&str>) -> AppResult<Resolution> {
        let Some(credential) = cookie else {
            return Ok(Resolution::Unauthenticated);
        };

        let uid = match self.sessions.verify_session(credential).await {
            Ok(uid) => uid,
            Err(AppError::Unauthenticated(_)) => return Ok(Resolution::Unauthenticated),
            Err(error) => return Err(error),
        };

        let Some(profile) = self.profiles.find_by_uid(&uid).await? else {
            warn!(%uid, "verified session has no stored profile");
            return Ok(Resolution::Unauthenticated);
        };

        Ok(Resolution::Authenticated(Identity::new(
            profile.uid(),
            profile.role(),
        )))
    }
}
