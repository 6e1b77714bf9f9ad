use std::collections::HashMap;

use async_trait::async_trait;
use atelier_application::FileStore;
use atelier_core::AppResult;
use tokio::sync::RwLock;

/// In-memory object storage for development mode and tests.
#[derive(Debug, Default)]
pub struct InMemoryObjectStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryObjectStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl FileStore for InMemoryObjectStorage {
    async fn upload(&self, name: &str, _content_type: &str, bytes: Vec<u8>) -> AppResult<String> {
        self.objects.write().await.insert(name.to_owned(), bytes);
        Ok(format!("memory://objects/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use atelier_application::FileStore;

    use super::InMemoryObjectStorage;

    #[tokio::test]
    async fn upload_returns_a_stable_url() {
        let storage = InMemoryObjectStorage::new();

        let url = storage.upload("logo.svg", "image/svg+xml", vec![1, 2, 3]).await;
        assert_eq!(url.ok().as_deref(), Some("memory://objects/logo.svg"));
        assert_eq!(storage.len().await, 1);
    }
}
