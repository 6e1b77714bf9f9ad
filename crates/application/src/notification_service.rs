//! User-facing notification records and delivery.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::{AppError, AppResult};
use atelier_domain::{Identity, NotificationId, NotificationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored notification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Stable notification identifier.
    pub id: NotificationId,
    /// Subject identifier of the recipient.
    pub recipient: String,
    /// Event category.
    pub kind: NotificationKind,
    /// Human-readable message.
    pub message: String,
    /// Whether the recipient has seen the notification.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository port over the notification document collection.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Appends a notification document.
    async fn push(&self, notification: NotificationRecord) -> AppResult<()>;

    /// Lists notifications addressed to a recipient.
    async fn list_for_recipient(&self, uid: &str) -> AppResult<Vec<NotificationRecord>>;

    /// Finds a notification by identifier.
    async fn find(&self, id: NotificationId) -> AppResult<Option<NotificationRecord>>;

    /// Marks a notification as read.
    async fn mark_read(&self, id: NotificationId) -> AppResult<()>;
}

/// Application service for notifications.
///
/// Notifications are uid-scoped: reading and updating them needs no
/// permission beyond authentication, but only the recipient may touch them.
#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Creates a notification service over its repository.
    #[must_use]
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Records a notification for a recipient.
    pub async fn notify(
        &self,
        recipient: &str,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> AppResult<()> {
        self.repository
            .push(NotificationRecord {
                id: NotificationId::new(),
                recipient: recipient.to_owned(),
                kind,
                message: message.into(),
                read: false,
                created_at: Utc::now(),
            })
            .await
    }

    /// Lists the caller's own notifications, newest first.
    pub async fn list_own(&self, identity: &Identity) -> AppResult<Vec<NotificationRecord>> {
        let mut notifications = self.repository.list_for_recipient(identity.uid()).await?;
        notifications.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(notifications)
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(&self, identity: &Identity, id: NotificationId) -> AppResult<()> {
        let notification = self
            .repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("notification not found".to_owned()))?;

        if notification.recipient != identity.uid() {
            return Err(AppError::Forbidden(
                "notification belongs to another recipient".to_owned(),
            ));
        }

        self.repository.mark_read(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use atelier_core::{AppError, AppResult};
    use atelier_domain::{Identity, NotificationId, NotificationKind, Role};
    use tokio::sync::RwLock;

    use super::{NotificationRecord, NotificationRepository, NotificationService};

    #[derive(Default)]
    struct FakeNotificationRepository {
        notifications: RwLock<HashMap<NotificationId, NotificationRecord>>,
    }

    #[async_trait]
    impl NotificationRepository for FakeNotificationRepository {
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

    #[tokio::test]
    async fn listing_only_returns_the_callers_notifications() {
        let service = NotificationService::new(Arc::new(FakeNotificationRepository::default()));

        let pushed = service
            .notify("uid-a", NotificationKind::OrderCreated, "new order")
            .await;
        assert!(pushed.is_ok());
        let pushed = service
            .notify("uid-b", NotificationKind::TaskAssigned, "task for you")
            .await;
        assert!(pushed.is_ok());

        let identity = Identity::new("uid-a", Role::Designer);
        let own = service.list_own(&identity).await.unwrap_or_default();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].kind, NotificationKind::OrderCreated);
    }

    #[tokio::test]
    async fn only_the_recipient_may_mark_as_read() {
        let repository = Arc::new(FakeNotificationRepository::default());
        let service = NotificationService::new(repository.clone());

        let pushed = service
            .notify("uid-a", NotificationKind::OrderApproved, "approved")
            .await;
        assert!(pushed.is_ok());

        let identity = Identity::new("uid-a", Role::Client);
        let own = service.list_own(&identity).await.unwrap_or_default();
        assert_eq!(own.len(), 1);
        let id = own[0].id;

        let stranger = Identity::new("uid-b", Role::Admin);
        let denied = service.mark_read(&stranger, id).await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let allowed = service.mark_read(&identity, id).await;
        assert!(allowed.is_ok());

        let own = service.list_own(&identity).await.unwrap_or_default();
        assert!(own[0].read);
    }

    #[tokio::test]
    async fn marking_a_missing_notification_is_not_found() {
        let service = NotificationService::new(Arc::new(FakeNotificationRepository::default()));
        let identity = Identity::new("uid-a", Role::Client);

        let missing = service.mark_read(&identity, NotificationId::new()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
