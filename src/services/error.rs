use thiserror::Error;

pub const SLUG_TAKEN: &str = "Slug must be unique. This slug is already in use.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn slug_taken() -> Self {
        Self::Conflict(SLUG_TAKEN.to_string())
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        if is_slug_violation(&err) {
            return Self::slug_taken();
        }
        Self::Unexpected(err.into())
    }
}

impl From<r2d2::Error> for ServiceError {
    fn from(err: r2d2::Error) -> Self {
        Self::Unexpected(err.into())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(err.into())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(err.into())
    }
}

/// Storage-level UNIQUE violation on `posts.slug`, e.g. when two writers
/// race past the pre-write availability check.
fn is_slug_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains("posts.slug")
        }
        _ => false,
    }
}
