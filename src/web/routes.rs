use super::handlers;
use super::state::AppState;
use crate::services::media::UPLOADS_PREFIX;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Room for the text fields of a multipart form on top of the image itself.
const FORM_OVERHEAD: usize = 1024 * 1024;

fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(FORM_OVERHEAD)
}

pub fn api_routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/blogs",
            get(handlers::posts::list).post(handlers::posts::create),
        )
        .route("/api/blogs/stats", get(handlers::posts::stats))
        .route(
            "/api/blogs/check-slug/:slug",
            get(handlers::posts::check_slug),
        )
        .route("/api/blogs/slug/:slug", get(handlers::posts::show_by_slug))
        .route(
            "/api/blogs/:id",
            get(handlers::posts::show)
                .put(handlers::posts::update)
                .delete(handlers::posts::destroy),
        )
        .route(
            "/api/blogs/:id/toggle-publish",
            patch(handlers::posts::toggle_publish),
        )
        .route(
            "/api/blogs/:id/increment-view",
            patch(handlers::posts::increment_view),
        )
        .route("/api/blogs/:id/seo", get(handlers::seo::post_report))
        .route("/api/seo/score", post(handlers::seo::score_draft))
        .layer(DefaultBodyLimit::max(body_limit(max_upload_bytes)))
}

pub fn public_routes(media_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .nest_service(UPLOADS_PREFIX, ServeDir::new(media_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_saturates() {
        assert_eq!(body_limit(1024), 1024 + FORM_OVERHEAD);
        assert_eq!(body_limit(usize::MAX), usize::MAX);
    }
}
