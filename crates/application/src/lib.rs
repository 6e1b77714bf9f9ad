//! Application services and ports.

#![forbid(unsafe_code)]

mod access_gate;
mod brief_service;
mod notification_service;
mod order_service;
mod session_resolver;
mod session_service;
mod settings_service;
mod user_directory;

pub use access_gate::{
    AccessGate, GateState, LOGIN_ROUTE, UNAUTHORIZED_ROUTE, evaluate as evaluate_gate,
};
pub use brief_service::{BriefService, CompletionClient};
pub use notification_service::{
    NotificationRecord, NotificationRepository, NotificationService,
};
pub use order_service::{
    AttachmentRecord, ChecklistItemRecord, CreateOrderInput, FileStore, OrderAnalytics,
    OrderRecord, OrderRepository, OrderService, OrderStatusCount, UpdateOrderInput,
};
pub use session_resolver::{Resolution, SessionResolver};
pub use session_service::{
    IdentityVerifier, SESSION_TTL, SESSION_TTL_SECONDS, SessionCredential, SessionService,
    VerifiedSession,
};
pub use settings_service::{SettingsRepository, SettingsService, WorkspaceSettings};
pub use user_directory::{PROFILE_NOT_FOUND, ProfileRepository, UserDirectoryService};
