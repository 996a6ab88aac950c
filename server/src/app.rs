use std::path::PathBuf;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::routes;
use crate::state::AppState;

const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

pub(crate) fn build_app(state: AppState, static_dir: PathBuf) -> Router {
    // Unknown paths get the client shell so deep links still boot the page.
    let index = ServeFile::new(static_dir.join("index.html"));
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(static_dir)
                .precompressed_br()
                .precompressed_gzip()
                .fallback(index),
        )
        .layer(middleware::from_fn(cache_bundle_assets));

    let app = Router::new()
        .route(
            "/api/pin-player",
            axum::routing::post(routes::api::pin_player),
        )
        .route(
            "/api/pinned-players",
            axum::routing::get(routes::api::pinned_players),
        )
        .route(
            "/api/message",
            axum::routing::get(routes::api::get_message).post(routes::api::set_message),
        )
        .route("/api/health", axum::routing::get(routes::api::health));

    app.layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .fallback_service(static_assets)
        .with_state(state)
}

/// Long-lived caching for content-hashed bundle files. The index page served
/// in place of a missing file is never cached this way.
async fn cache_bundle_assets(request: Request, next: Next) -> Response {
    let hashed = is_hashed_bundle_asset(request.uri().path());
    let mut response = next.run(request).await;

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("text/html"));
    if hashed && !is_html && response.status().is_success() {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE),
        );
    }

    response
}

/// Trunk names its output `<crate>-<hash>.js`, `<crate>-<hash>_bg.wasm` and
/// `<name>-<hash>.css`.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let stem = stem.strip_suffix("_bg").unwrap_or(stem);
    stem.rsplit_once('-').is_some_and(|(_, hash)| {
        hash.len() >= 8 && hash.chars().all(|c| c.is_ascii_hexdigit())
    })
}
