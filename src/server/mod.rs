//! HTTP surface.
//!
//! - [`client`] - visitor address and Cloudflare metadata extraction
//! - [`handler`] - route handlers

mod client;
mod handler;

pub use client::{cf_metadata, client_address, ClientContext, CONNECTING_IP_HEADER};

use crate::config::Config;
use crate::geoip::DataSource;
use axum::routing::get;
use axum::Router;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

/// State shared by all handlers. Immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<DataSource>,
}

impl AppState {
    pub fn new(config: Config, source: DataSource) -> Self {
        AppState {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }
}

/// Build the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/api/classify", get(handler::classify))
        .route("/health", get(handler::health))
        .with_state(state)
}

/// Bind `config.listen` and serve until Ctrl-C.
pub async fn serve(config: Config, source: DataSource) -> Result<(), Box<dyn Error>> {
    let listen = config.listen;
    let app = router(AppState::new(config, source));

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| format!("Failed to bind {listen}: {e}"))?;
    log::info!("Listening on http://{listen}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Error waiting for Ctrl-C: {e}");
        }
        log::info!("Received shutdown signal");
    })
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let source = DataSource::Files {
            geoip_path: "src/tests/test_data/geoip_test.json".into(),
            pop_path: "src/tests/test_data/pop_test.json".into(),
        };
        router(AppState::new(Config::default(), source))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Error reading body");
        String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
    }

    #[tokio::test]
    async fn test_index_starlink_client() {
        let request = Request::builder()
            .uri("/")
            .header("cf-connecting-ip", "203.0.113.10")
            .header("cf-ipcountry", "US")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Starlink PoP: San Jose"));
        assert!(html.contains("pop1.sjc.starlinkisp.net"));
        assert!(html.contains("<p> Country: US </p>"));
    }

    #[tokio::test]
    async fn test_index_other_client() {
        let request = Request::builder()
            .uri("/")
            .header("cf-connecting-ip", "8.8.8.8")
            .body(Body::empty())
            .unwrap();
        let html = body_text(test_app().oneshot(request).await.unwrap()).await;
        assert!(html.contains("You are probably not using Starlink"));
    }

    #[tokio::test]
    async fn test_index_without_address() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<p> IP address: unknown </p>"));
    }

    #[tokio::test]
    async fn test_index_dataset_unavailable() {
        let source = DataSource::Files {
            geoip_path: "src/tests/test_data/missing.json".into(),
            pop_path: "src/tests/test_data/pop_test.json".into(),
        };
        let app = router(AppState::new(Config::default(), source));
        let request = Request::builder()
            .uri("/")
            .header("cf-connecting-ip", "203.0.113.10")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_api_classify_query() {
        let request = Request::builder()
            .uri("/api/classify?ip=2a0d:3344:1ab::1")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("Invalid JSON");
        assert_eq!(json["matched"], true);
        assert_eq!(json["pop_code"], "fra2");
        assert_eq!(json["pop_city"], "Frankfurt");
        assert_eq!(json["location"][0], "DE");
    }

    #[tokio::test]
    async fn test_api_classify_bad_address() {
        let request = Request::builder()
            .uri("/api/classify?ip=bad")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("Invalid JSON");
        assert!(json["error"].as_str().unwrap().contains("malformed address"));
    }

    #[tokio::test]
    async fn test_api_classify_no_address() {
        let request = Request::builder()
            .uri("/api/classify")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(body_text(response).await, "ok");
    }
}
