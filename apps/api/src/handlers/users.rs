use std::str::FromStr;

use atelier_domain::{Identity, Role};
use axum::Json;
use axum::extract::{Extension, Path, State};

use crate::dto::{UpdateRoleRequest, UserProfileResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = state.user_directory.get_profile(&identity, &id).await?;
    Ok(Json(UserProfileResponse::from(profile)))
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<UserProfileResponse>>> {
    let profiles = state
        .user_directory
        .list_profiles(&identity)
        .await?
        .into_iter()
        .map(UserProfileResponse::from)
        .collect();

    Ok(Json(profiles))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let role = Role::from_str(payload.role.as_str())?;
    let profile = state.user_directory.set_role(&identity, &id, role).await?;
    Ok(Json(UserProfileResponse::from(profile)))
}
