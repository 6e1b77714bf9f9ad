use async_trait::async_trait;
use atelier_application::ProfileRepository;
use atelier_core::AppResult;
use atelier_domain::UserProfile;

use crate::document_store::DocumentStoreClient;

const COLLECTION: &str = "users";

/// Profile repository backed by the external document store.
#[derive(Clone)]
pub struct DocstoreProfileRepository {
    store: DocumentStoreClient,
}

impl DocstoreProfileRepository {
    /// Creates a repository over the `users` collection.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for DocstoreProfileRepository {
    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        self.store.get_document(COLLECTION, uid).await
    }

    async fn list(&self) -> AppResult<Vec<UserProfile>> {
        self.store.list_documents(COLLECTION).await
    }

    async fn upsert(&self, profile: UserProfile) -> AppResult<()> {
        self.store
            .put_document(COLLECTION, profile.uid(), &profile)
            .await
    }
}
