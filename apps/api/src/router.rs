use atelier_core::{AppError, AppResult};
use axum::Router;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

/// Builds the full application router over the shared state.
pub fn build_router(state: AppState) -> AppResult<Router> {
    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&state.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/api/users", get(handlers::users::list_users_handler))
        .route("/api/users/{id}", get(handlers::users::get_user_handler))
        .route(
            "/api/users/{id}/role",
            put(handlers::users::update_role_handler),
        )
        .route(
            "/api/orders",
            get(handlers::orders::list_orders_handler)
                .post(handlers::orders::create_order_handler),
        )
        .route(
            "/api/orders/analytics/summary",
            get(handlers::orders::analytics_handler),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::orders::get_order_handler)
                .put(handlers::orders::update_order_handler)
                .delete(handlers::orders::delete_order_handler),
        )
        .route(
            "/api/orders/{id}/submit",
            post(handlers::orders::submit_order_handler),
        )
        .route(
            "/api/orders/{id}/approve",
            post(handlers::orders::approve_order_handler),
        )
        .route(
            "/api/orders/{id}/status",
            post(handlers::orders::transition_order_handler),
        )
        .route(
            "/api/orders/{id}/checklist",
            post(handlers::orders::add_checklist_item_handler),
        )
        .route(
            "/api/orders/{id}/checklist/{item_id}/assign",
            post(handlers::orders::assign_checklist_item_handler),
        )
        .route(
            "/api/orders/{id}/attachments",
            post(handlers::orders::attach_file_handler),
        )
        .route(
            "/api/orders/{id}/brief",
            post(handlers::briefs::generate_brief_handler),
        )
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications_handler),
        )
        .route(
            "/api/notifications/{id}/read",
            post(handlers::notifications::mark_notification_read_handler),
        )
        .route(
            "/api/settings",
            get(handlers::settings::get_settings_handler)
                .put(handlers::settings::update_settings_handler),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/auth/create-session",
            post(auth::create_session_handler),
        )
        .route(
            "/api/auth/check-session",
            post(auth::check_session_handler),
        )
        .route("/api/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use atelier_application::{
        BriefService, NotificationRepository, NotificationService, OrderRepository, OrderService,
        ProfileRepository, SessionResolver, SessionService, SettingsRepository, SettingsService,
        UserDirectoryService,
    };
    use atelier_infrastructure::{
        ConsoleCompletionClient, InMemoryIdentityVerifier, InMemoryNotificationRepository,
        InMemoryObjectStorage, InMemoryOrderRepository, InMemoryProfileRepository,
        InMemorySettingsRepository,
    };
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_router;
    use crate::dev_seed;
    use crate::state::AppState;

    const FRONTEND_ORIGIN: &str = "http://localhost:3000";

    async fn test_router() -> Router {
        let verifier = Arc::new(InMemoryIdentityVerifier::new());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(InMemoryProfileRepository::new());
        let orders: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
        let notifications: Arc<dyn NotificationRepository> =
            Arc::new(InMemoryNotificationRepository::new());
        let settings: Arc<dyn SettingsRepository> = Arc::new(InMemorySettingsRepository::new());

        let seeded = dev_seed::run(&verifier, &profiles).await;
        assert!(seeded.is_ok());

        let session_service = SessionService::new(verifier);
        let session_resolver = SessionResolver::new(session_service.clone(), profiles.clone());
        let notification_service = NotificationService::new(notifications);
        let order_service = OrderService::new(
            orders,
            Arc::new(InMemoryObjectStorage::new()),
            profiles.clone(),
            notification_service.clone(),
        );
        let brief_service = BriefService::new(
            Arc::new(ConsoleCompletionClient::new()),
            order_service.clone(),
        );

        let state = AppState {
            session_service,
            session_resolver,
            order_service,
            user_directory: UserDirectoryService::new(profiles),
            notification_service,
            brief_service,
            settings_service: SettingsService::new(settings),
            frontend_url: FRONTEND_ORIGIN.to_owned(),
            cookie_secure: false,
        };

        match build_router(state) {
            Ok(router) => router,
            Err(error) => panic!("router construction failed: {error}"),
        }
    }

    fn request(
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        origin: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, format!("session={cookie}"));
        }

        let result = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };

        match result {
            Ok(request) => request,
            Err(error) => panic!("request construction failed: {error}"),
        }
    }

    fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        request(Method::POST, uri, cookie, Some(FRONTEND_ORIGIN), Some(body))
    }

    fn get_authed(uri: &str, cookie: &str) -> Request<Body> {
        request(Method::GET, uri, Some(cookie), None, None)
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value, Option<String>) {
        let response = match router.clone().oneshot(req).await {
            Ok(response) => response,
            Err(error) => panic!("request failed: {error}"),
        };

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        let bytes = match response.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(error) => panic!("body collection failed: {error}"),
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body, set_cookie)
    }

    /// Logs in with a seeded identity token and returns the credential.
    async fn login(router: &Router, id_token: &str) -> String {
        let (status, body, set_cookie) = send(
            router,
            post_json("/api/auth/create-session", None, json!({"idToken": id_token})),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        assert_eq!(body["status"], "success");

        let set_cookie = set_cookie.unwrap_or_default();
        let credential = set_cookie
            .split(';')
            .next()
            .and_then(|pair| pair.split_once('='))
            .map(|(_, value)| value.to_owned())
            .unwrap_or_default();
        assert!(!credential.is_empty(), "no session cookie in: {set_cookie}");

        credential
    }

    #[tokio::test]
    async fn create_session_sets_the_five_day_cookie_and_me_resolves_it() {
        let router = test_router().await;

        let (status, body, set_cookie) = send(
            &router,
            post_json(
                "/api/auth/create-session",
                None,
                json!({"idToken": "dev-token-admin"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let set_cookie = set_cookie.unwrap_or_default();
        assert!(set_cookie.starts_with("session="));
        assert!(set_cookie.contains("Max-Age=432000"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));

        let credential = login(&router, "dev-token-admin").await;
        let (status, body, _) = send(&router, get_authed("/auth/me", &credential)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["uid"], "dev-admin");
        assert_eq!(body["role"], "admin");
    }

    #[tokio::test]
    async fn create_session_rejects_unknown_tokens_uniformly() {
        let router = test_router().await;

        let (status, body, set_cookie) = send(
            &router,
            post_json(
                "/api/auth/create-session",
                None,
                json!({"idToken": "forged-token"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
        assert_eq!(set_cookie, None);
    }

    #[tokio::test]
    async fn check_session_reports_both_outcomes() {
        let router = test_router().await;
        let credential = login(&router, "dev-token-client").await;

        let (status, body, _) = send(
            &router,
            post_json(
                "/api/auth/check-session",
                None,
                json!({"session": credential}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "authenticated");
        assert_eq!(body["uid"], "dev-client");

        let (status, body, _) = send(
            &router,
            post_json(
                "/api/auth/check-session",
                None,
                json!({"session": "stale-credential"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], "unauthenticated");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn protected_routes_require_a_session_cookie() {
        let router = test_router().await;

        let (status, _, _) = send(
            &router,
            request(Method::GET, "/api/orders", None, None, None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_profile_is_a_spanish_404() {
        let router = test_router().await;
        let credential = login(&router, "dev-token-admin").await;

        let (status, body, _) =
            send(&router, get_authed("/api/users/uid-ghost", &credential)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Usuario no encontrado");
    }

    #[tokio::test]
    async fn directory_listing_is_admin_only() {
        let router = test_router().await;

        let client_credential = login(&router, "dev-token-client").await;
        let (status, _, _) = send(&router, get_authed("/api/users", &client_credential)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin_credential = login(&router, "dev-token-admin").await;
        let (status, body, _) = send(&router, get_authed("/api/users", &admin_credential)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn order_lifecycle_notifies_the_client() {
        let router = test_router().await;
        let client = login(&router, "dev-token-client").await;
        let manager = login(&router, "dev-token-pm").await;

        let (status, body, _) = send(
            &router,
            post_json(
                "/api/orders",
                Some(&client),
                json!({"title": "Identidad visual", "description": "logo y papelería"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "draft");
        let order_id = body["id"].as_str().unwrap_or_default().to_owned();

        let (status, _, _) = send(
            &router,
            post_json(
                &format!("/api/orders/{order_id}/submit"),
                Some(&manager),
                json!({}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body, _) = send(
            &router,
            post_json(
                &format!("/api/orders/{order_id}/approve"),
                Some(&manager),
                json!({}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");

        let (status, body, _) = send(&router, get_authed("/api/notifications", &client)).await;
        assert_eq!(status, StatusCode::OK);
        let kinds: Vec<&str> = body
            .as_array()
            .map(|notifications| {
                notifications
                    .iter()
                    .filter_map(|notification| notification["kind"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert!(kinds.contains(&"order_approved"));
    }

    #[tokio::test]
    async fn clients_cannot_read_foreign_orders() {
        let router = test_router().await;
        let manager = login(&router, "dev-token-pm").await;
        let client = login(&router, "dev-token-client").await;

        let (status, body, _) = send(
            &router,
            post_json(
                "/api/orders",
                Some(&manager),
                json!({"title": "Campaña interna"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let order_id = body["id"].as_str().unwrap_or_default().to_owned();

        let (status, _, _) = send(
            &router,
            get_authed(&format!("/api/orders/{order_id}"), &client),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body, _) = send(&router, get_authed("/api/orders", &client)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn logout_revokes_the_credential_and_clears_the_cookie() {
        let router = test_router().await;
        let credential = login(&router, "dev-token-designer").await;

        let (status, _, _) = send(&router, get_authed("/auth/me", &credential)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, set_cookie) = send(
            &router,
            post_json("/api/auth/logout", Some(&credential), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(set_cookie.unwrap_or_default().contains("Max-Age=0"));

        let (status, _, _) = send(&router, get_authed("/auth/me", &credential)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cross_site_mutations_are_blocked() {
        let router = test_router().await;

        let (status, _, _) = send(
            &router,
            request(
                Method::POST,
                "/api/auth/create-session",
                None,
                Some("https://evil.example"),
                Some(json!({"idToken": "dev-token-admin"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(
            &router,
            request(
                Method::POST,
                "/api/auth/create-session",
                None,
                None,
                Some(json!({"idToken": "dev-token-admin"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn settings_are_gated_by_manage_settings() {
        let router = test_router().await;

        let manager = login(&router, "dev-token-pm").await;
        let (status, _, _) = send(&router, get_authed("/api/settings", &manager)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = login(&router, "dev-token-admin").await;
        let (status, body, _) = send(&router, get_authed("/api/settings", &admin)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["studio_name"], "Atelier");

        let (status, body, _) = send(
            &router,
            request(
                Method::PUT,
                "/api/settings",
                Some(&admin),
                Some(FRONTEND_ORIGIN),
                Some(json!({
                    "studio_name": "Estudio Norte",
                    "default_locale": "es-AR",
                    "notifications_enabled": false
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["studio_name"], "Estudio Norte");
    }

    #[tokio::test]
    async fn brief_generation_uses_the_completion_client() {
        let router = test_router().await;
        let manager = login(&router, "dev-token-pm").await;

        let (status, body, _) = send(
            &router,
            post_json(
                "/api/orders",
                Some(&manager),
                json!({"title": "Packaging de temporada"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let order_id = body["id"].as_str().unwrap_or_default().to_owned();

        let (status, body, _) = send(
            &router,
            post_json(&format!("/api/orders/{order_id}/brief"), Some(&manager), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            body["brief"]
                .as_str()
                .unwrap_or_default()
                .contains("console completion")
        );
    }
}
