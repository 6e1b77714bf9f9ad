use atelier_application::WorkspaceSettings;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for replacing workspace settings.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/settings-request.ts"
)]
pub struct SettingsRequest {
    pub studio_name: String,
    pub default_locale: String,
    pub notifications_enabled: bool,
}

impl From<SettingsRequest> for WorkspaceSettings {
    fn from(value: SettingsRequest) -> Self {
        Self {
            studio_name: value.studio_name,
            default_locale: value.default_locale,
            notifications_enabled: value.notifications_enabled,
        }
    }
}

/// Workspace settings as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/settings-response.ts"
)]
pub struct SettingsResponse {
    pub studio_name: String,
    pub default_locale: String,
    pub notifications_enabled: bool,
}

impl From<WorkspaceSettings> for SettingsResponse {
    fn from(value: WorkspaceSettings) -> Self {
        Self {
            studio_name: value.studio_name,
            default_locale: value.default_locale,
            notifications_enabled: value.notifications_enabled,
        }
    }
}
