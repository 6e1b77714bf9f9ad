//! In-memory repositories for development mode and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use atelier_application::{
    NotificationRecord, NotificationRepository, OrderRecord, OrderRepository, ProfileRepository,
    SettingsRepository, WorkspaceSettings,
};
use atelier_core::{AppError, AppResult};
use atelier_domain::{NotificationId, OrderId, UserProfile};
use tokio::sync::RwLock;

/// In-memory profile repository.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserProfile>> {
        let mut profiles: Vec<UserProfile> =
            self.profiles.read().await.values().cloned().collect();
        profiles.sort_by(|left, right| left.uid().cmp(right.uid()));
        Ok(profiles)
    }

    async fn upsert(&self, profile: UserProfile) -> AppResult<()> {
        self.profiles
            .write()
            .await
            .insert(profile.uid().to_owned(), profile);
        Ok(())
    }
}

/// In-memory order repository.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, OrderRecord>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: OrderRecord) -> AppResult<()> {
        self.orders.write().await.insert(order.id, order);
        Ok(())
    }

    async fn find(&self, id: OrderId) -> AppResult<Option<OrderRecord>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<OrderRecord>> {
        Ok(self.orders.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: OrderId) -> AppResult<()> {
        self.orders.write().await.remove(&id);
        Ok(())
    }
}

/// In-memory notification repository.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<HashMap<NotificationId, NotificationRecord>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn push(&self, notification: NotificationRecord) -> AppResult<()> {
        self.notifications
            .write()
            .await
            .insert(notification.id, notification);
        Ok(())
    }

    async fn list_for_recipient(&self, uid: &str) -> AppResult<Vec<NotificationRecord>> {
        Ok(self
            .notifications
            .read()
            .await
            .values()
            .filter(|notification| notification.recipient == uid)
            .cloned()
            .collect())
    }

    async fn find(&self, id: NotificationId) -> AppResult<Option<NotificationRecord>> {
        Ok(self.notifications.read().await.get(&id).cloned())
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        match self.notifications.write().await.get_mut(&id) {
            Some(notification) => {
                notification.read = true;
                Ok(())
            }
            None => Err(AppError::NotFound("notification not found".to_owned())),
        }
    }
}

/// In-memory settings repository.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<Option<WorkspaceSettings>>,
}

impl InMemorySettingsRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self) -> AppResult<Option<WorkspaceSettings>> {
        Ok(self.settings.read().await.clone())
    }

    async fn store(&self, settings: WorkspaceSettings) -> AppResult<()> {
        *self.settings.write().await = Some(settings);
        Ok(())
    }
}
