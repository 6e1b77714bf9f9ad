use async_trait::async_trait;
use atelier_application::{SettingsRepository, WorkspaceSettings};
use atelier_core::AppResult;

use crate::document_store::DocumentStoreClient;

const COLLECTION: &str = "settings";
const DOCUMENT_ID: &str = "workspace";

/// Settings repository backed by the external document store.
#[derive(Clone)]
pub struct DocstoreSettingsRepository {
    store: DocumentStoreClient,
}

impl DocstoreSettingsRepository {
    /// Creates a repository over the single workspace settings document.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsRepository for DocstoreSettingsRepository {
    async fn load(&self) -> AppResult<Option<WorkspaceSettings>> {
        self.store.get_document(COLLECTION, DOCUMENT_ID).await
    }

    async fn store(&self, settings: WorkspaceSettings) -> AppResult<()> {
        self.store
            .put_document(COLLECTION, DOCUMENT_ID, &settings)
            .await
    }
}
