use atelier_domain::Identity;
use axum::Json;
use axum::extract::{Extension, State};

use crate::dto::{SettingsRequest, SettingsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_settings_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<SettingsResponse>> {
    let settings = state.settings_service.get(&identity).await?;
    Ok(Json(SettingsResponse::from(settings)))
}

pub async fn update_settings_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<SettingsRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    let settings = state
        .settings_service
        .update(&identity, payload.into())
        .await?;

    Ok(Json(SettingsResponse::from(settings)))
}
