//! Workspace-wide settings document.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::AppResult;
use atelier_domain::{Identity, Permission, require};
use serde::{Deserialize, Serialize};

/// Workspace settings stored as a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Studio name shown across the application.
    pub studio_name: String,
    /// Default locale for user-facing text.
    pub default_locale: String,
    /// Whether notifications are delivered at all.
    pub notifications_enabled: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            studio_name: "Atelier".to_owned(),
            default_locale: "es".to_owned(),
            notifications_enabled: true,
        }
    }
}

/// Repository port over the settings document.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the settings document, if one has been stored.
    async fn load(&self) -> AppResult<Option<WorkspaceSettings>>;

    /// Stores the settings document.
    async fn store(&self, settings: WorkspaceSettings) -> AppResult<()>;
}

/// Application service for workspace settings.
#[derive(Clone)]
pub struct SettingsService {
    repository: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    /// Creates a settings service over its repository.
    #[must_use]
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    /// Returns the stored settings, or defaults when none were saved yet.
    pub async fn get(&self, identity: &Identity) -> AppResult<WorkspaceSettings> {
        require(identity, Permission::ManageSettings)?;
        Ok(self.repository.load().await?.unwrap_or_default())
    }

    /// Replaces the settings document.
    pub async fn update(
        &self,
        identity: &Identity,
        settings: WorkspaceSettings,
    ) -> AppResult<WorkspaceSettings> {
        require(identity, Permission::ManageSettings)?;
        self.repository.store(settings.clone()).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use atelier_core::{AppError, AppResult};
    use atelier_domain::{Identity, Role};
    use tokio::sync::RwLock;

    use super::{SettingsRepository, SettingsService, WorkspaceSettings};

    #[derive(Default)]
    struct FakeSettingsRepository {
        settings: RwLock<Option<WorkspaceSettings>>,
    }

    #[async_trait]
    impl SettingsRepository for FakeSettingsRepository {
        async fn load(&self) -> AppResult<Option<WorkspaceSettings>> {
            Ok(self.settings.read().await.clone())
        }

        async fn store(&self, settings: WorkspaceSettings) -> AppResult<()> {
            *self.settings.write().await = Some(settings);
            Ok(())
        }
    }

    #[tokio::test]
    async fn defaults_apply_until_settings_are_stored() {
        let service = SettingsService::new(Arc::new(FakeSettingsRepository::default()));
        let admin = Identity::new("uid-admin", Role::Admin);

        let settings = service.get(&admin).await;
        assert_eq!(settings.ok(), Some(WorkspaceSettings::default()));
    }

    #[tokio::test]
    async fn update_round_trips_through_the_repository() {
        let service = SettingsService::new(Arc::new(FakeSettingsRepository::default()));
        let admin = Identity::new("uid-admin", Role::Admin);

        let updated = service
            .update(
                &admin,
                WorkspaceSettings {
                    studio_name: "Estudio Norte".to_owned(),
                    default_locale: "es-AR".to_owned(),
                    notifications_enabled: false,
                },
            )
            .await;
        assert!(updated.is_ok());

        let fetched = service.get(&admin).await;
        assert_eq!(
            fetched.map(|settings| settings.studio_name).ok(),
            Some("Estudio Norte".to_owned())
        );
    }

    #[tokio::test]
    async fn settings_access_requires_manage_settings() {
        let service = SettingsService::new(Arc::new(FakeSettingsRepository::default()));
        let manager = Identity::new("uid-pm", Role::ProjectManager);

        let read_denied = service.get(&manager).await;
        assert!(matches!(read_denied, Err(AppError::Forbidden(_))));

        let write_denied = service
            .update(&manager, WorkspaceSettings::default())
            .await;
        assert!(matches!(write_denied, Err(AppError::Forbidden(_))));
    }
}
