//! Adapters for Atelier's external collaborators: the identity provider,
//! the document store, object storage, and the completion API, each with an
//! in-memory counterpart for development and tests.

#![forbid(unsafe_code)]

mod console_completion_client;
mod docstore_notification_repository;
mod docstore_order_repository;
mod docstore_profile_repository;
mod docstore_settings_repository;
mod document_store;
mod http_completion_client;
mod http_identity_verifier;
mod http_object_storage;
mod in_memory_document_store;
mod in_memory_identity_verifier;
mod in_memory_object_storage;

pub use console_completion_client::ConsoleCompletionClient;
pub use docstore_notification_repository::DocstoreNotificationRepository;
pub use docstore_order_repository::DocstoreOrderRepository;
pub use docstore_profile_repository::DocstoreProfileRepository;
pub use docstore_settings_repository::DocstoreSettingsRepository;
pub use document_store::DocumentStoreClient;
pub use http_completion_client::HttpCompletionClient;
pub use http_identity_verifier::HttpIdentityVerifier;
pub use http_object_storage::HttpObjectStorage;
pub use in_memory_document_store::{
    InMemoryNotificationRepository, InMemoryOrderRepository, InMemoryProfileRepository,
    InMemorySettingsRepository,
};
pub use in_memory_identity_verifier::InMemoryIdentityVerifier;
pub use in_memory_object_storage::InMemoryObjectStorage;
