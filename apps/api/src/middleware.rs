use atelier_application::Resolution;
use atelier_core::AppError;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::extract_session_cookie;
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the session cookie and attaches the identity to the request.
///
/// The role always comes from the server-side resolution; no claim in the
/// request is trusted. Transient resolver failures surface as 500s here,
/// not as unauthenticated.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let cookie = extract_session_cookie(request.headers());
    let resolution = state.session_resolver.resolve(cookie.as_deref()).await?;

    match resolution {
        Resolution::Authenticated(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Resolution::Unauthenticated => {
            Err(AppError::Unauthenticated("authentication required".to_owned()).into())
        }
    }
}

/// Blocks cross-site state-changing requests.
///
/// The session cookie is `SameSite=Lax`, which still permits top-level
/// cross-site GETs; this check closes the door on cross-origin mutations.
pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthenticated("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let allowed_origin = state.frontend_url.as_str();
        let origin_is_allowed = origin == allowed_origin;
        let referer_is_allowed = !referer.is_empty() && referer.starts_with(allowed_origin);

        if !origin_is_allowed && !referer_is_allowed {
            return Err(AppError::Unauthenticated("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
