use atelier_application::{
    AttachmentRecord, ChecklistItemRecord, OrderAnalytics, OrderRecord,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for placing an order.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-order-request.ts"
)]
pub struct CreateOrderRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Incoming payload for updating order content.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-order-request.ts"
)]
pub struct UpdateOrderRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
}

/// Incoming payload for a generic status transition.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/transition-order-request.ts"
)]
pub struct TransitionOrderRequest {
    pub status: String,
}

/// Incoming payload for adding a checklist item.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/checklist-item-request.ts"
)]
pub struct ChecklistItemRequest {
    pub label: String,
}

/// Incoming payload for assigning a checklist item.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/assign-checklist-item-request.ts"
)]
pub struct AssignChecklistItemRequest {
    pub assignee_uid: String,
}

/// Query parameters accompanying an attachment upload body.
#[derive(Debug, Deserialize)]
pub struct AttachmentParams {
    pub name: String,
}

/// Checklist item as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/checklist-item-response.ts"
)]
pub struct ChecklistItemResponse {
    pub id: String,
    pub label: String,
    pub done: bool,
    pub assigned_to: Option<String>,
}

impl From<ChecklistItemRecord> for ChecklistItemResponse {
    fn from(value: ChecklistItemRecord) -> Self {
        Self {
            id: value.id.to_string(),
            label: value.label,
            done: value.done,
            assigned_to: value.assigned_to,
        }
    }
}

/// Attachment as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/attachment-response.ts"
)]
pub struct AttachmentResponse {
    pub name: String,
    pub url: String,
}

impl From<AttachmentRecord> for AttachmentResponse {
    fn from(value: AttachmentRecord) -> Self {
        Self {
            name: value.name,
            url: value.url,
        }
    }
}

/// Order as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/order-response.ts"
)]
pub struct OrderResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub checklist: Vec<ChecklistItemResponse>,
    pub attachments: Vec<AttachmentResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(value: OrderRecord) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            status: value.status.as_str().to_owned(),
            created_by: value.created_by,
            assigned_to: value.assigned_to,
            checklist: value.checklist.into_iter().map(Into::into).collect(),
            attachments: value.attachments.into_iter().map(Into::into).collect(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Per-status order count as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/status-count-response.ts"
)]
pub struct StatusCountResponse {
    pub status: String,
    pub count: u64,
}

/// Analytics summary as returned to clients.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/analytics-response.ts"
)]
pub struct AnalyticsResponse {
    pub total: u64,
    pub by_status: Vec<StatusCountResponse>,
}

impl From<OrderAnalytics> for AnalyticsResponse {
    fn from(value: OrderAnalytics) -> Self {
        Self {
            total: value.total,
            by_status: value
                .by_status
                .into_iter()
                .map(|entry| StatusCountResponse {
                    status: entry.status.as_str().to_owned(),
                    count: entry.count,
                })
                .collect(),
        }
    }
}

/// Generated creative brief.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/brief-response.ts"
)]
pub struct BriefResponse {
    pub brief: String,
}
