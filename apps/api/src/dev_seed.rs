//! Seed identities for the in-memory providers.
//!
//! One account per role, each with a pre-registered identity token so a
//! local client can log in without a real identity provider.

use std::sync::Arc;

use atelier_application::ProfileRepository;
use atelier_core::{AppResult, NonEmptyString};
use atelier_domain::{EmailAddress, Role, UserProfile};
use atelier_infrastructure::InMemoryIdentityVerifier;
use tracing::info;

const DEV_USERS: &[(&str, &str, &str, &str, Role)] = &[
    (
        "dev-token-admin",
        "dev-admin",
        "Ana Alvarez",
        "ana@atelier.local",
        Role::Admin,
    ),
    (
        "dev-token-pm",
        "dev-pm",
        "Pablo Medina",
        "pablo@atelier.local",
        Role::ProjectManager,
    ),
    (
        "dev-token-designer",
        "dev-designer",
        "Diego Serrano",
        "diego@atelier.local",
        Role::Designer,
    ),
    (
        "dev-token-client",
        "dev-client",
        "Carla Ortiz",
        "carla@atelier.local",
        Role::Client,
    ),
];

/// Registers the seed identity tokens and stores their profiles.
pub async fn run(
    verifier: &InMemoryIdentityVerifier,
    profiles: &Arc<dyn ProfileRepository>,
) -> AppResult<()> {
    for (id_token, uid, display_name, email, role) in DEV_USERS {
        verifier.register_id_token(*id_token, *uid).await;
        profiles
            .upsert(UserProfile::new(
                *uid,
                NonEmptyString::new(*display_name)?,
                EmailAddress::new(*email)?,
                *role,
            ))
            .await?;

        info!(uid = *uid, role = role.as_str(), "seeded dev identity");
    }

    Ok(())
}
