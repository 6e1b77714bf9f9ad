use atelier_application::{
    BriefService, NotificationService, OrderService, SessionResolver, SessionService,
    SettingsService, UserDirectoryService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session_service: SessionService,
    pub session_resolver: SessionResolver,
    pub order_service: OrderService,
    pub user_directory: UserDirectoryService,
    pub notification_service: NotificationService,
    pub brief_service: BriefService,
    pub settings_service: SettingsService,
    pub frontend_url: String,
    pub cookie_secure: bool,
}
