use atelier_application::NotificationRecord;
use serde::Serialize;
use ts_rs::TS;

/// Notification as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/notification-response.ts"
)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(value: NotificationRecord) -> Self {
        Self {
            id: value.id.to_string(),
            kind: value.kind.as_str().to_owned(),
            message: value.message,
            read: value.read,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}
