use atelier_domain::Identity;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for the identity-token exchange.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-session-request.ts"
)]
pub struct CreateSessionRequest {
    /// Short-lived token issued by the identity provider to the client.
    #[serde(rename = "idToken")]
    pub id_token: String,
}

/// Status-only response for session creation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/session-status-response.ts"
)]
pub struct SessionStatusResponse {
    pub status: String,
}

/// Incoming payload for an explicit credential check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/check-session-request.ts"
)]
pub struct CheckSessionRequest {
    pub session: String,
}

/// Successful credential check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/check-session-success-response.ts"
)]
pub struct CheckSessionSuccessResponse {
    pub status: String,
    pub uid: String,
}

/// Failed credential check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/check-session-failure-response.ts"
)]
pub struct CheckSessionFailureResponse {
    pub status: String,
    pub error: String,
}

/// Resolved identity plus its effective permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/me-response.ts"
)]
pub struct MeResponse {
    pub uid: String,
    pub role: String,
    pub permissions: Vec<String>,
}

impl MeResponse {
    /// Projects an identity into the client-facing shape.
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            uid: identity.uid().to_owned(),
            role: identity.role().as_str().to_owned(),
            permissions: identity
                .role()
                .permissions()
                .iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
        }
    }
}
