use async_trait::async_trait;
use atelier_application::{NotificationRecord, NotificationRepository};
use atelier_core::{AppError, AppResult};
use atelier_domain::NotificationId;

use crate::document_store::DocumentStoreClient;

const COLLECTION: &str = "notifications";

/// Notification repository backed by the external document store.
///
/// The store exposes no per-field query API, so recipient filtering happens
/// on this side after listing the collection.
#[derive(Clone)]
pub struct DocstoreNotificationRepository {
    store: DocumentStoreClient,
}

impl DocstoreNotificationRepository {
    /// Creates a repository over the `notifications` collection.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationRepository for DocstoreNotificationRepository {
    async fn push(&self, notification: NotificationRecord) -> AppResult<()> {
        self.store
            .put_document(COLLECTION, &notification.id.to_string(), &notification)
            .await
    }

    async fn list_for_recipient(&self, uid: &str) -> AppResult<Vec<NotificationRecord>> {
        let notifications: Vec<NotificationRecord> =
            self.store.list_documents(COLLECTION).await?;

        Ok(notifications
            .into_iter()
            .filter(|notification| notification.recipient == uid)
            .collect())
    }

    async fn find(&self, id: NotificationId) -> AppResult<Option<NotificationRecord>> {
        self.store.get_document(COLLECTION, &id.to_string()).await
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        let mut notification: NotificationRecord = self
            .store
            .get_document(COLLECTION, &id.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound("notification not found".to_owned()))?;

        notification.read = true;
        self.store
            .put_document(COLLECTION, &id.to_string(), &notification)
            .await
    }
}
