use atelier_core::AppError;
use atelier_domain::Identity;
use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse, Response};

use crate::dto::{
    CheckSessionFailureResponse, CheckSessionRequest, CheckSessionSuccessResponse,
    CreateSessionRequest, MeResponse, SessionStatusResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::cookie::{clear_session_cookie, extract_session_cookie, session_cookie};

/// POST /api/auth/create-session - Exchange an identity token for the
/// session cookie.
pub async fn create_session_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    let credential = state.session_service.create_session(&payload.id_token).await?;
    let cookie = session_cookie(
        &credential.value,
        credential.max_age_seconds,
        state.cookie_secure,
    )?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(SessionStatusResponse {
            status: "success".to_owned(),
        }),
    ))
}

/// POST /api/auth/check-session - Verify an explicit credential value.
pub async fn check_session_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckSessionRequest>,
) -> ApiResult<Response> {
    match state.session_service.verify_session(&payload.session).await {
        Ok(uid) => Ok(Json(CheckSessionSuccessResponse {
            status: "authenticated".to_owned(),
            uid,
        })
        .into_response()),
        Err(AppError::Unauthenticated(message)) => Ok((
            StatusCode::UNAUTHORIZED,
            Json(CheckSessionFailureResponse {
                status: "unauthenticated".to_owned(),
                error: message,
            }),
        )
            .into_response()),
        Err(error) => Err(error.into()),
    }
}

/// POST /api/auth/logout - Revoke the caller's sessions and drop the cookie.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(credential) = extract_session_cookie(&headers)
        && let Ok(uid) = state.session_service.verify_session(&credential).await
    {
        state.session_service.revoke_sessions(&uid).await?;
    }

    let cookie = clear_session_cookie(state.cookie_secure)?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        StatusCode::NO_CONTENT,
    ))
}

/// GET /auth/me - Return the resolved identity and its permissions.
pub async fn me_handler(
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<MeResponse>> {
    Ok(Json(MeResponse::from_identity(&identity)))
}
