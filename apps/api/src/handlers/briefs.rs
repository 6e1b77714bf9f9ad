use atelier_domain::{Identity, OrderId};
use axum::Json;
use axum::extract::{Extension, Path, State};
use uuid::Uuid;

use crate::dto::BriefResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn generate_brief_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BriefResponse>> {
    let brief = state
        .brief_service
        .generate_brief(&identity, OrderId::from_uuid(id))
        .await?;

    Ok(Json(BriefResponse { brief }))
}
