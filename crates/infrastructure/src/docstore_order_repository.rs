use async_trait::async_trait;
use atelier_application::{OrderRecord, OrderRepository};
use atelier_core::AppResult;
use atelier_domain::OrderId;

use crate::document_store::DocumentStoreClient;

const COLLECTION: &str = "orders";

/// Order repository backed by the external document store.
#[derive(Clone)]
pub struct DocstoreOrderRepository {
    store: DocumentStoreClient,
}

impl DocstoreOrderRepository {
    /// Creates a repository over the `orders` collection.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderRepository for DocstoreOrderRepository {
    async fn save(&self, order: OrderRecord) -> AppResult<()> {
        self.store
            .put_document(COLLECTION, &order.id.to_string(), &order)
            .await
    }

    async fn find(&self, id: OrderId) -> AppResult<Option<OrderRecord>> {
        self.store.get_document(COLLECTION, &id.to_string()).await
    }

    async fn list(&self) -> AppResult<Vec<OrderRecord>> {
        self.store.list_documents(COLLECTION).await
    }

    async fn delete(&self, id: OrderId) -> AppResult<()> {
        self.store
            .delete_document(COLLECTION, &id.to_string())
            .await
    }
}
