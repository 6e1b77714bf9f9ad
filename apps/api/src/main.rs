//! Atelier API composition root.

#![forbid(unsafe_code)]

mod auth;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod router;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use atelier_application::{
    BriefService, CompletionClient, FileStore, IdentityVerifier, NotificationRepository,
    NotificationService, OrderRepository, OrderService, ProfileRepository, SessionResolver,
    SessionService, SettingsRepository, SettingsService, UserDirectoryService,
};
use atelier_core::AppError;
use atelier_infrastructure::{
    ConsoleCompletionClient, DocstoreNotificationRepository, DocstoreOrderRepository,
    DocstoreProfileRepository, DocstoreSettingsRepository, DocumentStoreClient,
    HttpCompletionClient, HttpIdentityVerifier, HttpObjectStorage, InMemoryIdentityVerifier,
    InMemoryNotificationRepository, InMemoryObjectStorage, InMemoryOrderRepository,
    InMemoryProfileRepository, InMemorySettingsRepository,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let http_client = reqwest::Client::new();

    // Identity provider: the source of record for session credentials.
    let identity_provider =
        env::var("IDENTITY_PROVIDER").unwrap_or_else(|_| "memory".to_owned());
    let (identity_verifier, seed_verifier): (
        Arc<dyn IdentityVerifier>,
        Option<Arc<InMemoryIdentityVerifier>>,
    ) = match identity_provider.as_str() {
        "http" => {
            let base_url = required_base_url_env("IDENTITY_PROVIDER_URL")?;
            let api_key = required_non_empty_env("IDENTITY_PROVIDER_API_KEY")?;
            (
                Arc::new(HttpIdentityVerifier::new(
                    http_client.clone(),
                    base_url,
                    api_key,
                )),
                None,
            )
        }
        "memory" => {
            let verifier = Arc::new(InMemoryIdentityVerifier::new());
            (verifier.clone(), Some(verifier))
        }
        _ => {
            return Err(AppError::Validation(format!(
                "IDENTITY_PROVIDER must be either 'http' or 'memory', got '{identity_provider}'"
            )));
        }
    };

    // Document store: profiles, orders, notifications, and settings.
    let document_store_provider =
        env::var("DOCUMENT_STORE_PROVIDER").unwrap_or_else(|_| "memory".to_owned());
    let (profile_repository, order_repository, notification_repository, settings_repository): (
        Arc<dyn ProfileRepository>,
        Arc<dyn OrderRepository>,
        Arc<dyn NotificationRepository>,
        Arc<dyn SettingsRepository>,
    ) = match document_store_provider.as_str() {
        "http" => {
            let base_url = required_base_url_env("DOCUMENT_STORE_URL")?;
            let api_key = required_non_empty_env("DOCUMENT_STORE_API_KEY")?;
            let store = DocumentStoreClient::new(http_client.clone(), base_url, api_key);
            (
                Arc::new(DocstoreProfileRepository::new(store.clone())),
                Arc::new(DocstoreOrderRepository::new(store.clone())),
                Arc::new(DocstoreNotificationRepository::new(store.clone())),
                Arc::new(DocstoreSettingsRepository::new(store)),
            )
        }
        "memory" => (
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::new(InMemorySettingsRepository::new()),
        ),
        _ => {
            return Err(AppError::Validation(format!(
                "DOCUMENT_STORE_PROVIDER must be either 'http' or 'memory', got '{document_store_provider}'"
            )));
        }
    };

    // Object storage for order attachments.
    let object_storage_provider =
        env::var("OBJECT_STORAGE_PROVIDER").unwrap_or_else(|_| "memory".to_owned());
    let file_store: Arc<dyn FileStore> = match object_storage_provider.as_str() {
        "http" => {
            let base_url = required_base_url_env("OBJECT_STORAGE_URL")?;
            let api_key = required_non_empty_env("OBJECT_STORAGE_API_KEY")?;
            Arc::new(HttpObjectStorage::new(
                http_client.clone(),
                base_url,
                api_key,
            ))
        }
        "memory" => Arc::new(InMemoryObjectStorage::new()),
        _ => {
            return Err(AppError::Validation(format!(
                "OBJECT_STORAGE_PROVIDER must be either 'http' or 'memory', got '{object_storage_provider}'"
            )));
        }
    };

    // Completion API for brief generation.
    let completion_provider =
        env::var("COMPLETION_PROVIDER").unwrap_or_else(|_| "console".to_owned());
    let completion_client: Arc<dyn CompletionClient> = match completion_provider.as_str() {
        "http" => {
            let base_url = required_base_url_env("COMPLETION_API_URL")?;
            let api_key = required_non_empty_env("COMPLETION_API_KEY")?;
            Arc::new(HttpCompletionClient::new(http_client, base_url, api_key))
        }
        "console" => Arc::new(ConsoleCompletionClient::new()),
        _ => {
            return Err(AppError::Validation(format!(
                "COMPLETION_PROVIDER must be either 'http' or 'console', got '{completion_provider}'"
            )));
        }
    };

    let session_service = SessionService::new(identity_verifier);
    let session_resolver =
        SessionResolver::new(session_service.clone(), profile_repository.clone());
    let notification_service = NotificationService::new(notification_repository);
    let order_service = OrderService::new(
        order_repository,
        file_store,
        profile_repository.clone(),
        notification_service.clone(),
    );
    let brief_service = BriefService::new(completion_client, order_service.clone());
    let user_directory = UserDirectoryService::new(profile_repository.clone());
    let settings_service = SettingsService::new(settings_repository);

    // Seed development identities when both stores are in-memory; seeding a
    // real document store from here would clobber production data.
    if let Some(verifier) = seed_verifier.as_ref()
        && document_store_provider == "memory"
    {
        dev_seed::run(verifier, &profile_repository).await?;
    }

    let app_state = AppState {
        session_service,
        session_resolver,
        order_service,
        user_directory,
        notification_service,
        brief_service,
        settings_service,
        frontend_url,
        cookie_secure,
    };

    let app = router::build_router(app_state)?;

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "atelier-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn required_base_url_env(name: &str) -> Result<String, AppError> {
    let value = required_non_empty_env(name)?;
    Url::parse(&value).map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))?;

    Ok(value)
}
