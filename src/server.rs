use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::ComplaintStore;
use crate::handlers::{protected::complaints, public};
use crate::middleware::{jwt_auth_middleware, require_admin, require_citizen, AUTH_HEADER};
use crate::services::ComplaintService;

/// Shared handles injected into every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ComplaintStore>,
    pub complaints: ComplaintService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ComplaintStore>) -> Self {
        Self {
            config: Arc::new(config),
            complaints: ComplaintService::new(store.clone()),
            store,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .nest_service("/uploads", ServeDir::new(&config.server.upload_dir))
        // Protected API
        .merge(complaint_routes(&state))
        // Global middleware
        .layer(cors_layer(&config.security.cors_origins));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn complaint_routes(state: &AppState) -> Router<AppState> {
    let form_limit = DefaultBodyLimit::max(state.config.server.max_form_bytes());

    Router::new()
        .route(
            "/api/complaints",
            get(complaints::list_all.layer(from_fn(require_admin))).post(
                complaints::create_complaint
                    .layer(from_fn(require_citizen))
                    .layer(form_limit),
            ),
        )
        .route("/api/complaints/user/:id", get(complaints::list_user_complaints))
        .route("/api/complaints/:id", get(complaints::get_complaint))
        .route(
            "/api/complaints/:id/status",
            put(complaints::update_status.layer(from_fn(require_admin))),
        )
        // Identity check runs before any role gate
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

/// Explicit origin allow-list; an empty list admits no cross-origin callers
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list origins explicitly");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(AUTH_HEADER)])
}

/// Resolves on ctrl-c or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install ctrl-c handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AppConfig::development();
        config.security.jwt_secret = "router-test-secret".to_string();
        config.api.enable_request_logging = false;
        app(AppState::new(config, Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        let cases = [
            (Method::GET, "/api/complaints"),
            (Method::POST, "/api/complaints"),
            (Method::GET, "/api/complaints/user/abc"),
            (Method::GET, "/api/complaints/abc"),
            (Method::PUT, "/api/complaints/abc/status"),
        ];

        for (method, uri) in cases {
            let response = test_app()
                .oneshot(Request::builder().method(method.clone()).uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn public_routes_are_open() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn preflight_only_admits_listed_origins() {
        let preflight = |origin: &'static str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/complaints")
                .header("origin", origin)
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = test_app().oneshot(preflight("http://localhost:5173")).await.unwrap();
        assert_eq!(
            allowed.headers().get("access-control-allow-origin").map(|v| v.as_bytes()),
            Some("http://localhost:5173".as_bytes())
        );

        let denied = test_app().oneshot(preflight("https://evil.example")).await.unwrap();
        assert!(denied.headers().get("access-control-allow-origin").is_none());
    }
}
