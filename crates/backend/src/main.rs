mod config;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse};
use axum::{extract::State, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";
const CACHE_NO_CACHE: &str = "no-cache";

const PLACEHOLDER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Pontos no mapa</title></head>
<body>
<h1>Pontos no mapa</h1>
<p>Frontend not built yet. Run <code>dx bundle</code> and point DIST_DIR at the output.</p>
</body>
</html>"#;

#[derive(Clone)]
struct AppState {
    dist_dir: Arc<PathBuf>,
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

/// Build the full application router for a bundle directory.
///
/// Hashed bundle files under `/assets` and `/wasm` are cached forever; every
/// other path gets `index.html` so client-side routes survive a reload.
fn build_app(dist_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        )
        .nest(
            "/wasm",
            cached_static_router(&dist_dir.join("wasm"), CACHE_IMMUTABLE),
        );

    let state = AppState {
        dist_dir: Arc::new(dist_dir.to_path_buf()),
    };

    Router::new()
        .route("/", get(serve_index))
        .fallback(serve_index)
        .with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
}

async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    let path = state.dist_dir.join("index.html");
    let html = match tokio::fs::read_to_string(&path).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Bundle index missing, serving placeholder");
            PLACEHOLDER_PAGE.to_string()
        }
    };
    ([(header::CACHE_CONTROL, CACHE_NO_CACHE)], Html(html))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    if !config.dist_dir.is_dir() {
        tracing::warn!(dist_dir = %config.dist_dir.display(), "Bundle directory not found");
    }

    let app = build_app(&config.dist_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running at http://localhost:{}", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Lay out a bundle directory the way `dx bundle` does.
    fn temp_bundle() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>pinmap</html>").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets").join("main-abc123.css"), "body{}").unwrap();
        std::fs::create_dir(dir.path().join("wasm")).unwrap();
        std::fs::write(dir.path().join("wasm").join("pinmap_bg.wasm"), "\0asm").unwrap();
        dir
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_bundle_assets_have_immutable_cache() {
        let dist = temp_bundle();
        let app = build_app(dist.path());

        let resp = app.oneshot(get_request("/assets/main-abc123.css")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_wasm_has_immutable_cache() {
        let dist = temp_bundle();
        let app = build_app(dist.path());

        let resp = app.oneshot(get_request("/wasm/pinmap_bg.wasm")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_asset_returns_404() {
        let dist = temp_bundle();
        let app = build_app(dist.path());

        let resp = app.oneshot(get_request("/assets/nonexistent.js")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dist = temp_bundle();
        let app = build_app(dist.path());

        let resp = app.oneshot(get_request("/")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-cache");
        assert_eq!(body_string(resp).await, "<html>pinmap</html>");
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let dist = temp_bundle();
        let app = build_app(dist.path());

        let resp = app.oneshot(get_request("/some/client/route")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "<html>pinmap</html>");
    }

    #[tokio::test]
    async fn test_missing_bundle_serves_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(dir.path());

        let resp = app.oneshot(get_request("/")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_index_and_assets_have_different_cache_policies() {
        let dist = temp_bundle();
        let app = build_app(dist.path());

        let index_resp = app.clone().oneshot(get_request("/")).await.unwrap();
        let asset_resp = app
            .oneshot(get_request("/assets/main-abc123.css"))
            .await
            .unwrap();

        let index_cc = index_resp.headers().get("cache-control").unwrap();
        let asset_cc = asset_resp.headers().get("cache-control").unwrap();
        assert_ne!(index_cc, asset_cc);
        assert!(asset_cc.to_str().unwrap().contains("immutable"));
    }
}
