use atelier_core::{AppError, AppResult};
use axum::http::{HeaderMap, HeaderValue, header};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Formats the `Set-Cookie` value carrying a session credential.
///
/// `HttpOnly` keeps the credential away from client script; `SameSite=Lax`
/// plus the same-origin middleware covers cross-site mutations; `Secure` is
/// appended only in production so local HTTP development keeps working.
pub fn session_cookie(value: &str, max_age_seconds: u64, secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={value}; Max-Age={max_age_seconds}; Path=/; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|error| AppError::Internal(format!("invalid session cookie value: {error}")))
}

/// Formats the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> AppResult<HeaderValue> {
    session_cookie("", 0, secure)
}

/// Extracts the session cookie value from request headers.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_owned())
    })
}
