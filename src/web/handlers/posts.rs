use crate::models::{Post, PostFilter, PostStatus};
use crate::services::media::{self, PendingUpload};
use crate::services::posts::{self, StatusCounts};
use crate::services::{ServiceError, ServiceResult};
use crate::web::error::AppResult;
use crate::web::extractors::{PostForm, PostId};
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckSlugParams {
    #[serde(rename = "excludeId")]
    pub exclude_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/blogs
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Post>>> {
    let status = match non_empty(params.status) {
        Some(s) => Some(s.parse::<PostStatus>().map_err(|_| {
            ServiceError::validation(format!("Unknown status '{}'", s))
        })?),
        None => None,
    };
    let filter = PostFilter {
        status,
        search: non_empty(params.search),
    };
    Ok(Json(posts::list_posts(&state.db, &filter)?))
}

/// GET /api/blogs/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> AppResult<Json<StatusCounts>> {
    Ok(Json(posts::status_counts(&state.db)?))
}

/// GET /api/blogs/check-slug/:slug
pub async fn check_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<CheckSlugParams>,
) -> AppResult<Json<serde_json::Value>> {
    let exclude_id = match non_empty(params.exclude_id) {
        Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
            ServiceError::validation(format!("Invalid excludeId '{}'", raw))
        })?),
        None => None,
    };
    let is_unique = posts::is_slug_available(&state.db, &slug, exclude_id)?;
    Ok(Json(serde_json::json!({ "isUnique": is_unique })))
}

/// GET /api/blogs/:id
pub async fn show(State(state): State<Arc<AppState>>, PostId(id): PostId) -> AppResult<Json<Post>> {
    let post = posts::get_post(&state.db, id)?.ok_or(ServiceError::NotFound("Blog"))?;
    Ok(Json(post))
}

/// GET /api/blogs/slug/:slug
pub async fn show_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Json<Post>> {
    let post = posts::get_post_by_slug(&state.db, &slug)?.ok_or(ServiceError::NotFound("Blog"))?;
    Ok(Json(post))
}

/// POST /api/blogs
pub async fn create(
    State(state): State<Arc<AppState>>,
    mut form: PostForm,
) -> AppResult<Json<Post>> {
    let upload = form.take_upload();
    let mut input = form.into_create()?;

    let stored = store_pending(&state, upload)?;
    if let Some(path) = &stored {
        input.featured_image = Some(path.clone());
    }
    let result = posts::create_post(&state.db, input);
    Ok(Json(discard_on_error(&state, stored, result)?))
}

/// PUT /api/blogs/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
    mut form: PostForm,
) -> AppResult<Json<Post>> {
    let upload = form.take_upload();
    let mut input = form.into_update()?;

    let stored = store_pending(&state, upload)?;
    if let Some(path) = &stored {
        input.featured_image = Some(path.clone());
    }
    let result = posts::update_post(&state.db, id, input);
    Ok(Json(discard_on_error(&state, stored, result)?))
}

/// DELETE /api/blogs/:id
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> AppResult<Json<serde_json::Value>> {
    posts::delete_post(&state.db, id)?;
    Ok(Json(serde_json::json!({ "message": "Blog deleted successfully" })))
}

/// PATCH /api/blogs/:id/toggle-publish
pub async fn toggle_publish(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> AppResult<Json<Post>> {
    Ok(Json(posts::toggle_publish(&state.db, id)?))
}

/// PATCH /api/blogs/:id/increment-view
pub async fn increment_view(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> AppResult<Json<Post>> {
    Ok(Json(posts::increment_views(&state.db, id)?))
}

fn store_pending(state: &AppState, upload: Option<PendingUpload>) -> ServiceResult<Option<String>> {
    upload
        .map(|u| u.store(&state.media_dir, state.max_upload_bytes))
        .transpose()
}

/// Deletes an image stored for a write that the service then rejected, so
/// failed submissions leave nothing behind in the upload directory.
fn discard_on_error<T>(
    state: &AppState,
    stored: Option<String>,
    result: ServiceResult<T>,
) -> ServiceResult<T> {
    if result.is_err() {
        if let Some(path) = stored {
            if let Err(e) = media::remove_upload(&state.media_dir, &path) {
                tracing::warn!("Failed to remove orphaned upload {}: {}", path, e);
            }
        }
    }
    result
}
