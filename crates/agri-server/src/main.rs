//! AgriGenius Static Host
//!
//! Serves the compiled WASM page for local preview, with a health check.
//! Unknown paths fall back to `index.html` so client-side routes resolve.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handlers::health_check;
use crate::state::{AppState, ServerConfig};

fn app(state: AppState) -> Router {
    let site = ServeDir::new(&state.config.static_dir).fallback(ServeFile::new(state.config.index_file()));

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(site)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    if !config.index_file().exists() {
        tracing::warn!("⚠ {} not found - build the page with `trunk build` first", config.index_file().display());
    }

    let addr = config.bind_addr;
    let state = AppState { config: Arc::new(config) };
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🌱 AgriGenius running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("  GET  /health  - Health check");
    tracing::info!("  GET  /*       - Page ({})", state.config.static_dir.display());

    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    fn site() -> (AppState, PathBuf) {
        let dir = std::env::temp_dir().join(format!("agri-server-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>agrigenius</html>").unwrap();

        let config = ServerConfig {
            bind_addr: ServerConfig::DEFAULT_BIND_ADDR.parse().unwrap(),
            static_dir: dir.clone(),
        };
        (AppState { config: Arc::new(config) }, dir)
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
        let response = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (state, dir) = site();
        let (status, body) = get(state, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_unknown_path_serves_index() {
        let (state, dir) = site();
        let (status, body) = get(state, "/chatbot").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("agrigenius"));
        std::fs::remove_dir_all(dir).ok();
    }
}
