pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::pitch::handlers as pitch_handlers;
use crate::sample::handlers as sample_handlers;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// The single-page form. All data comes from the JSON routes below.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        // Sample path
        .route("/api/v1/sample", get(sample_handlers::handle_list_samples))
        .route(
            "/api/v1/sample/:name",
            get(sample_handlers::handle_get_sample_pitch),
        )
        // Upload path
        .route(
            "/api/v1/pitches",
            post(pitch_handlers::handle_preview_pitches),
        )
        .route(
            "/api/v1/pitches/download",
            post(pitch_handlers::handle_download_pitches),
        )
        .layer(upload_limit)
        .with_state(state)
}
