mod auth;
mod common;
mod notifications;
mod orders;
mod settings;
mod users;

pub use auth::{
    CheckSessionFailureResponse, CheckSessionRequest, CheckSessionSuccessResponse,
    CreateSessionRequest, MeResponse, SessionStatusResponse,
};
pub use common::HealthResponse;
pub use notifications::NotificationResponse;
pub use orders::{
    AnalyticsResponse, AssignChecklistItemRequest, AttachmentParams, AttachmentResponse,
    BriefResponse, ChecklistItemRequest, ChecklistItemResponse, CreateOrderRequest,
    OrderResponse, StatusCountResponse, TransitionOrderRequest, UpdateOrderRequest,
};
pub use settings::{SettingsRequest, SettingsResponse};
pub use users::{UpdateRoleRequest, UserProfileResponse};
