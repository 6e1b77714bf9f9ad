//! Profile lookup and role administration.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::{AppError, AppResult};
use atelier_domain::{Identity, Permission, Role, UserProfile, require};

/// Message returned when a requested profile does not exist.
pub const PROFILE_NOT_FOUND: &str = "Usuario no encontrado";

/// Repository port over the profile document collection.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile document by subject identifier.
    async fn find_by_uid(&self, uid: &str) -> AppResult<Option<UserProfile>>;

    /// Lists every stored profile document.
    async fn list(&self) -> AppResult<Vec<UserProfile>>;

    /// Creates or replaces a profile document.
    async fn upsert(&self, profile: UserProfile) -> AppResult<()>;
}

/// Application service for the user directory.
#[derive(Clone)]
pub struct UserDirectoryService {
    profiles: Arc<dyn ProfileRepository>,
}

impl UserDirectoryService {
    /// Creates a directory service over the profile store.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fetches a profile document.
    ///
    /// Self-access is always allowed; reading anyone else requires
    /// `manage_users`.
    pub async fn get_profile(&self, identity: &Identity, uid: &str) -> AppResult<UserProfile> {
        if identity.uid() != uid {
            require(identity, Permission::ManageUsers)?;
        }

        self.profiles
            .find_by_uid(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_owned()))
    }

    /// Lists every profile, sorted by display name.
    pub async fn list_profiles(&self, identity: &Identity) -> AppResult<Vec<UserProfile>> {
        require(identity, Permission::ManageUsers)?;

        let mut profiles = self.profiles.list().await?;
        profiles.sort_by(|left, right| left.display_name().cmp(right.display_name()));
        Ok(profiles)
    }

    /// Reassigns a user's role and returns the updated profile.
    ///
    /// This is the only path that changes a role; role claims arriving from
    /// clients are never applied.
    pub async fn set_role(
        &self,
        identity: &Identity,
        uid: &str,
        role: Role,
    ) -> AppResult<UserProfile> {
        require(identity, Permission::ManageUsers)?;

        let profile = self
            .profiles
            .find_by_uid(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_owned()))?;

        let updated = profile.with_role(role);
        self.profiles.upsert(updated.clone()).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use atelier_core::{AppError, AppResult, NonEmptyString};
    use atelier_domain::{EmailAddress, Identity, Role, UserProfile};
    use tokio::sync::RwLock;

    use super::{ProfileRepository, UserDirectoryService};

    #[derive(Default)]
    struct FakeProfileRepository {
        profiles: RwLock<HashMap<String, UserProfile>>,
    }

    #[async_trait]
    impl ProfileRepository for FakeProfileRepository {
        async fn find_by_uid(&self, uid: &str) -> AppResult<Option<UserProfile>> {
            Ok(self.profiles.read().await.get(uid).cloned())
        }

        async fn list(&self) -> AppResult<Vec<UserProfile>> {
            Ok(self.profiles.read().await.values().cloned().collect())
        }

        async fn upsert(&self, profile: UserProfile) -> AppResult<()> {
            self.profiles
                .write()
                .await
                .insert(profile.uid().to_owned(), profile);
            Ok(())
        }
    }

    fn profile(uid: &str, name: &str, role: Role) -> UserProfile {
        let display_name = NonEmptyString::new(name);
        let email = EmailAddress::new(format!("{uid}@estudio.example"));
        match (display_name, email) {
            (Ok(display_name), Ok(email)) => UserProfile::new(uid, display_name, email, role),
            _ => panic!("fixture profile must validate"),
        }
    }

    async fn service_with_profiles(profiles: Vec<UserProfile>) -> UserDirectoryService {
        let repository = FakeProfileRepository::default();
        for profile in profiles {
            let _ = repository.upsert(profile).await;
        }

        UserDirectoryService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn self_access_needs_no_permission() {
        let service =
            service_with_profiles(vec![profile("uid-client", "Carla", Role::Client)]).await;
        let identity = Identity::new("uid-client", Role::Client);

        let fetched = service.get_profile(&identity, "uid-client").await;
        assert!(fetched.is_ok());
    }

    #[tokio::test]
    async fn reading_another_profile_requires_manage_users() {
        let service = service_with_profiles(vec![
            profile("uid-client", "Carla", Role::Client),
            profile("uid-admin", "Ana", Role::Admin),
        ])
        .await;

        let client = Identity::new("uid-client", Role::Client);
        let denied = service.get_profile(&client, "uid-admin").await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let admin = Identity::new("uid-admin", Role::Admin);
        let allowed = service.get_profile(&admin, "uid-client").await;
        assert!(allowed.is_ok());
    }

    #[tokio::test]
    async fn missing_profile_maps_to_the_spanish_not_found_message() {
        let service = service_with_profiles(vec![]).await;
        let admin = Identity::new("uid-admin", Role::Admin);

        let missing = service.get_profile(&admin, "uid-ghost").await;
        match missing {
            Err(AppError::NotFound(message)) => assert_eq!(message, "Usuario no encontrado"),
            other => panic!("expected not-found error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_role_persists_the_new_role() {
        let service =
            service_with_profiles(vec![profile("uid-designer", "Diego", Role::Designer)]).await;
        let admin = Identity::new("uid-admin", Role::Admin);

        let updated = service
            .set_role(&admin, "uid-designer", Role::ProjectManager)
            .await;
        assert!(updated.is_ok());

        let fetched = service.get_profile(&admin, "uid-designer").await;
        assert_eq!(
            fetched.map(|profile| profile.role()).ok(),
            Some(Role::ProjectManager)
        );
    }

    #[tokio::test]
    async fn set_role_is_denied_without_manage_users() {
        let service =
            service_with_profiles(vec![profile("uid-designer", "Diego", Role::Designer)]).await;
        let manager = Identity::new("uid-pm", Role::ProjectManager);

        let denied = service
            .set_role(&manager, "uid-designer", Role::Admin)
            .await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));
    }
}
