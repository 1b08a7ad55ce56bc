use crate::models::{CreatePost, UpdatePost};
use crate::services::media::{self, resolve_mime, PendingUpload};
use crate::services::ServiceError;
use crate::web::error::AppError;
use crate::web::state::AppState;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::Json;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const FEATURED_IMAGE_FIELD: &str = "featuredImage";

/// Fields that are derived or server-owned and never taken from a form.
const IGNORED_FIELDS: &[&str] = &[
    "id",
    "_id",
    "readTime",
    "publishedDate",
    "viewsCount",
    "createdAt",
    "updatedAt",
];

/// A post submission, either `multipart/form-data` (with an optional
/// featured image file) or a JSON object.
///
/// An attached image is checked during extraction but kept in memory; the
/// handler writes it only once the submission is accepted.
#[derive(Debug, Default)]
pub struct PostForm {
    fields: Map<String, Value>,
    upload: Option<PendingUpload>,
}

impl PostForm {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let mut form = Self::default();
        for (name, value) in fields {
            form.insert(name, value);
        }
        form
    }

    pub fn insert(&mut self, name: String, value: Value) {
        if IGNORED_FIELDS.contains(&name.as_str()) {
            return;
        }
        self.fields.insert(name, value);
    }

    /// Inserts a multipart text value, coercing the few non-string fields.
    pub fn insert_text(&mut self, name: String, text: String) {
        let value = match name.as_str() {
            "isFeatured" => match text.trim() {
                "" => return,
                t => Value::Bool(matches!(t, "true" | "on" | "1")),
            },
            "status" if text.trim().is_empty() => return,
            _ => Value::String(text),
        };
        self.insert(name, value);
    }

    pub fn take_upload(&mut self) -> Option<PendingUpload> {
        self.upload.take()
    }

    pub fn into_create(self) -> Result<CreatePost, ServiceError> {
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| ServiceError::validation(format!("Invalid submission: {}", e)))
    }

    pub fn into_update(self) -> Result<UpdatePost, ServiceError> {
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| ServiceError::validation(format!("Invalid submission: {}", e)))
    }
}

#[axum::async_trait]
impl FromRequest<Arc<AppState>> for PostForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| ServiceError::validation(e.body_text()))?;
            return match value {
                Value::Object(fields) => Ok(Self::from_fields(fields)),
                _ => Err(ServiceError::validation("Expected a JSON object").into()),
            };
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ServiceError::validation(e.body_text()))?;

        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServiceError::validation(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == FEATURED_IMAGE_FIELD {
                if let Some(original_name) = field.file_name().map(str::to_string) {
                    let mime_type = resolve_mime(&original_name, field.content_type());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ServiceError::validation(e.body_text()))?;
                    // An empty file input still sends a part with no bytes.
                    if !data.is_empty() {
                        media::check_upload(&mime_type, data.len(), state.max_upload_bytes)?;
                        form.upload = Some(PendingUpload {
                            original_name,
                            mime_type,
                            data: data.to_vec(),
                        });
                    }
                    continue;
                }
            }

            let text = field
                .text()
                .await
                .map_err(|e| ServiceError::validation(e.body_text()))?;
            form.insert_text(name, text);
        }

        Ok(form)
    }
}

/// The `:id` segment of a post route. A non-numeric id is rejected with the
/// regular JSON error body.
pub struct PostId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ServiceError::validation(e.body_text()))?;
        match raw.trim().parse() {
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(ServiceError::validation(format!("Invalid blog id '{}'", raw)).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostStatus;

    #[test]
    fn test_text_fields_are_coerced() {
        let mut form = PostForm::default();
        form.insert_text("title".into(), "Hello".into());
        form.insert_text("isFeatured".into(), "true".into());
        form.insert_text("status".into(), "Published".into());
        form.insert_text("tags".into(), "a, b".into());
        form.insert_text("readTime".into(), "99".into());

        let input = form.into_create().unwrap();
        assert_eq!(input.title, "Hello");
        assert!(input.is_featured);
        assert_eq!(input.status, PostStatus::Published);
        assert_eq!(input.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_take_upload_leaves_fields() {
        let mut form = PostForm::default();
        form.insert_text("title".into(), "With image".into());
        form.upload = Some(PendingUpload {
            original_name: "a.png".into(),
            mime_type: "image/png".into(),
            data: b"png".to_vec(),
        });

        let upload = form.take_upload().unwrap();
        assert_eq!(upload.original_name, "a.png");
        assert!(form.take_upload().is_none());
        assert_eq!(form.into_create().unwrap().title, "With image");
    }

    #[test]
    fn test_blank_status_is_skipped() {
        let mut form = PostForm::default();
        form.insert_text("status".into(), "".into());
        let input = form.into_update().unwrap();
        assert!(input.status.is_none());
    }

    #[test]
    fn test_unknown_status_is_a_validation_error() {
        let mut form = PostForm::default();
        form.insert_text("status".into(), "Scheduled".into());
        assert!(matches!(form.into_create(), Err(ServiceError::Validation(_))));
    }
}
