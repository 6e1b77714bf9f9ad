use atelier_domain::UserProfile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Profile document as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-profile-response.ts"
)]
pub struct UserProfileResponse {
    pub uid: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            uid: value.uid().to_owned(),
            display_name: value.display_name().to_owned(),
            email: value.email().to_owned(),
            role: value.role().as_str().to_owned(),
        }
    }
}

/// Incoming payload for a role change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    pub role: String,
}
