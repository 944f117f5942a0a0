//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Mark the service online once the listener is confirmed bound
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::health::probes::{liveness, readiness};
use crate::health::HealthState;
use crate::http::error::ApiError;
use crate::http::greeting::greeting;
use crate::name::{setup_name_router, NameToggle};
use crate::observability::metrics;
use crate::reload::SharedConfig;
use crate::store::{setup_store_router, ProductStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: SharedConfig,
    pub health: HealthState,
    pub products: ProductStore,
    pub name: NameToggle,
    pub admin_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: SharedConfig, health: HealthState) -> Self {
        Self {
            config,
            health,
            products: ProductStore::new(),
            name: NameToggle::new(),
            admin_key: None,
        }
    }

    pub fn with_admin_key(mut self, key: Option<String>) -> Self {
        self.admin_key = key.map(Arc::from);
        self
    }
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server over the given state.
    pub fn new(state: AppState, request_timeout: Duration) -> Self {
        let router = build_router(state.clone(), request_timeout);
        Self { router, state }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        self.state.health.mark_online();
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .route("/api/greeting", get(greeting))
        .route("/api/health/readiness", get(readiness))
        .route("/api/health/liveness", get(liveness))
        .route("/health", get(readiness))
        .merge(setup_admin_router(state.clone()))
        .merge(setup_name_router())
        .merge(setup_store_router())
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state);

    with_request_timeout(router, request_timeout)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Bound every request by `timeout`, answering with the JSON error body.
#[allow(deprecated)]
fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(timeout_as_json))
}

async fn timeout_as_json(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.at(path).into_response();
    }
    response
}

async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, &path, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::handlers::STOP_ACK;
    use crate::reload::ConfigSnapshot;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state() -> AppState {
        AppState::new(SharedConfig::new(), HealthState::new())
    }

    fn publish(state: &AppState, message: &str) {
        let snapshot: ConfigSnapshot = [("message", message)].into_iter().collect();
        state.config.publish(Some(Arc::new(snapshot)));
    }

    async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
        let app = build_router(state.clone(), Duration::from_secs(5));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn put(state: &AppState, uri: &str, body: &str) -> (StatusCode, String) {
        let app = build_router(state.clone(), Duration::from_secs(5));
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn json(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_greeting_default_and_named() {
        let state = app_state();
        state.health.mark_online();
        publish(&state, "Hello, %s!");

        let (status, body) = get(&state, "/api/greeting").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["content"], "Hello, World!");

        let (_, body) = get(&state, "/api/greeting?name=rustacean").await;
        assert_eq!(json(&body)["content"], "Hello, rustacean!");
    }

    #[tokio::test]
    async fn test_probes_before_online() {
        let state = app_state();

        let (status, body) = get(&state, "/api/health/readiness").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        let (status, body) = get(&state, "/api/health/liveness").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json(&body)["outcome"], "DOWN");
    }

    #[tokio::test]
    async fn test_offline_gates_greeting_and_liveness() {
        let state = app_state();
        state.health.mark_online();
        publish(&state, "Hello, %s!");

        let (status, body) = get(&state, "/api/health/liveness").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["checks"][0]["id"], "server-online");

        let (status, body) = get(&state, "/api/killme").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, STOP_ACK);

        let (status, body) = get(&state, "/api/greeting").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["path"], "/api/greeting");

        let (status, _) = get(&state, "/api/health/liveness").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = get(&state, "/api/health/readiness").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_configuration_is_server_error() {
        let state = app_state();
        state.health.mark_online();

        let (status, body) = get(&state, "/api/greeting").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json(&body)["error"].as_str().unwrap().contains("configuration"));

        state
            .config
            .publish(Some(Arc::new([("level", "DEBUG")].into_iter().collect())));
        let (status, _) = get(&state, "/api/greeting").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_admin_key_required_when_configured() {
        let state = app_state().with_admin_key(Some("secret".into()));
        state.health.mark_online();

        let (status, _) = get(&state, "/api/killme").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(state.health.is_online());

        let app = build_router(state.clone(), Duration::from_secs(5));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/killme")
                    .header("authorization", "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.health.is_online());
    }

    #[tokio::test]
    async fn test_status_reports_config_keys() {
        let state = app_state();
        publish(&state, "Hello, %s!");

        let (status, body) = get(&state, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["status"], "STARTING");
        assert_eq!(body["config_present"], true);
        assert_eq!(body["config_keys"], serde_json::json!(["message"]));
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let app = build_router(app_state(), Duration::from_secs(5));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_name_service_fail_and_recover() {
        let state = app_state();

        let (status, body) = get(&state, "/api/name").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["name"], crate::name::handlers::NAME);

        let (status, body) = put(&state, "/api/state", r#"{"state":"fail"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["state"], "fail");

        let (_, body) = get(&state, "/api/state").await;
        assert_eq!(json(&body)["state"], "fail");

        let (status, body) = get(&state, "/api/name").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["path"], "/api/name");

        let (status, body) = put(&state, "/api/state", r#"{"state":"ok"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["state"], "ok");

        let (_, body) = get(&state, "/api/state").await;
        assert_eq!(json(&body)["state"], "ok");
        let (status, _) = get(&state, "/api/name").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_name_state_rejects_bad_bodies() {
        let state = app_state();

        let (status, _) = put(&state, "/api/state", "not json").await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let (status, body) = put(&state, "/api/state", r#"{"state":"sideways"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json(&body)["path"], "/api/state");

        let (_, body) = get(&state, "/api/state").await;
        assert_eq!(json(&body)["state"], "ok");
    }

    #[tokio::test]
    async fn test_request_timeout_has_error_body() {
        async fn slow() -> &'static str {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }

        let app = with_request_timeout(
            Router::new().route("/slow", axum::routing::get(slow)),
            Duration::from_millis(20),
        );
        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Request timed out");
        assert_eq!(body["path"], "/slow");
    }
}
