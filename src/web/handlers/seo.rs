use crate::services::posts;
use crate::services::seo::{self, SeoDraft, SeoInput, SeoReport};
use crate::services::ServiceError;
use crate::web::error::AppResult;
use crate::web::extractors::PostId;
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

/// GET /api/blogs/:id/seo
pub async fn post_report(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> AppResult<Json<SeoReport>> {
    Ok(Json(posts::seo_report(&state.db, id)?))
}

/// POST /api/seo/score
pub async fn score_draft(
    payload: Result<Json<SeoDraft>, JsonRejection>,
) -> AppResult<Json<SeoReport>> {
    let Json(draft) = payload.map_err(|e| ServiceError::validation(e.body_text()))?;
    Ok(Json(seo::score(SeoInput::from(&draft))))
}
