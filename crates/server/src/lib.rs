//! Helper utilities to launch the Bridgescope API server.
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cognitive_complexity)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use api::{self, ApiState};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use eyre::Result;
use runtime::{health, shutdown::ShutdownSignal};
mod rate_limit;
use rate_limit::RateLimitLayer;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use warehouse::WarehouseReader;

/// Version prefix for all API routes.
pub const API_VERSION: &str = "v1";

/// Build the API router with CORS and tracing layers.
pub fn router(state: ApiState, allowed_origins: Vec<String>) -> Router {
    let allowed = Arc::new(allowed_origins);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = Arc::clone(&allowed);
            move |origin: &HeaderValue, _| match origin.to_str() {
                Ok(origin) => {
                    allowed.iter().any(|o| o == origin)
                        || origin.starts_with("http://localhost:")
                        || origin.starts_with("http://127.0.0.1:")
                }
                Err(_) => false,
            }
        }))
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_requests = state.max_requests();
    let rate_period = state.rate_period();
    let api_service = tower::ServiceBuilder::new()
        .layer(RateLimitLayer::new(max_requests, rate_period))
        .service(api::router(state));

    Router::new()
        .route("/health", get(health::handler))
        .nest_service(&format!("/{API_VERSION}"), api_service)
        .layer(cors)
        .layer(trace)
}

/// Run the API server on the given address until SIGINT or SIGTERM.
pub async fn run(
    addr: SocketAddr,
    client: WarehouseReader,
    allowed_origins: Vec<String>,
    max_requests: u64,
    rate_period: Duration,
) -> Result<()> {
    let state = ApiState::new(client, max_requests, rate_period);
    let app = router(state, allowed_origins);

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(ShutdownSignal::new())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiState, DEFAULT_MAX_REQUESTS, DEFAULT_RATE_PERIOD};
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use clickhouse::{
        Row,
        test::{Mock, handlers},
    };
    use serde::Serialize;
    use serde_json::{Value, json};
    use tower::util::ServiceExt;
    use url::Url;

    #[derive(Serialize, Row)]
    struct TotalRow {
        total_depositors: u64,
    }

    fn default_origins() -> Vec<String> {
        config::DEFAULT_ALLOWED_ORIGINS.split(',').map(|s| s.to_owned()).collect()
    }

    fn build_app(mock_url: &str, allowed: Vec<String>) -> Router {
        let url = Url::parse(mock_url).unwrap();
        let client =
            WarehouseReader::new(url, "db".to_owned(), "user".into(), "pass".into()).unwrap();
        let state = ApiState::new(client, DEFAULT_MAX_REQUESTS, DEFAULT_RATE_PERIOD);
        router(state, allowed)
    }

    async fn send_request(app: Router, origin: &str) -> (StatusCode, Value, Option<String>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{API_VERSION}/total-depositors"))
                    .header("Origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let cors = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body, cors)
    }

    #[tokio::test]
    async fn allows_default_origin() {
        let mock = Mock::new();
        mock.add(handlers::provide(vec![TotalRow { total_depositors: 42 }]));
        let app = build_app(mock.url(), default_origins());
        let (status, body, cors) = send_request(app, "https://bridgescope.xyz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "total_depositors": 42 }));
        assert_eq!(cors.as_deref(), Some("https://bridgescope.xyz"));
    }

    #[tokio::test]
    async fn allows_extra_origin() {
        let mock = Mock::new();
        mock.add(handlers::provide(vec![TotalRow { total_depositors: 42 }]));
        let mut origins = default_origins();
        origins.push("https://example.com".to_owned());
        let app = build_app(mock.url(), origins);
        let (status, _, cors) = send_request(app, "https://example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn allows_localhost_origin() {
        let mock = Mock::new();
        mock.add(handlers::provide(vec![TotalRow { total_depositors: 42 }]));
        let app = build_app(mock.url(), default_origins());
        let (status, _, cors) = send_request(app, "http://localhost:5173").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn allows_127_0_0_1_origin() {
        let mock = Mock::new();
        mock.add(handlers::provide(vec![TotalRow { total_depositors: 42 }]));
        let app = build_app(mock.url(), default_origins());
        let (status, _, cors) = send_request(app, "http://127.0.0.1:3001").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("http://127.0.0.1:3001"));
    }

    #[tokio::test]
    async fn denies_other_origin() {
        let mock = Mock::new();
        mock.add(handlers::provide(vec![TotalRow { total_depositors: 42 }]));
        let app = build_app(mock.url(), default_origins());
        let (status, _, cors) = send_request(app, "https://notallowed.com").await;
        assert_eq!(status, StatusCode::OK);
        assert!(cors.is_none());
    }

    #[tokio::test]
    async fn health_endpoint_is_unversioned() {
        let mock = Mock::new();
        let app = build_app(mock.url(), default_origins());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
