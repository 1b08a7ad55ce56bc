use crate::services::error::{ServiceError, ServiceResult};
use std::path::Path;
use uuid::Uuid;

/// URL prefix under which stored uploads are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Resolves the MIME type of an upload, falling back to the file extension
/// when the client sent none or a generic one.
pub fn resolve_mime(original_name: &str, declared: Option<&str>) -> String {
    match declared {
        Some(m) if !m.is_empty() && m != "application/octet-stream" => m.to_string(),
        _ => mime_guess::from_path(original_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}

/// A featured image received with a submission but not yet written to disk.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub original_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl PendingUpload {
    pub fn store(&self, upload_dir: &Path, max_size: usize) -> ServiceResult<String> {
        store_upload(upload_dir, &self.original_name, &self.mime_type, &self.data, max_size)
    }
}

/// Type and size rules for a featured image.
pub fn check_upload(mime_type: &str, size: usize, max_size: usize) -> ServiceResult<()> {
    if size == 0 {
        return Err(ServiceError::validation("Uploaded file is empty"));
    }
    if size > max_size {
        return Err(ServiceError::validation(format!(
            "File too large: {} bytes (max {} bytes)",
            size, max_size
        )));
    }
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(ServiceError::validation(format!(
            "File type not allowed: {}. Allowed types: {}",
            mime_type,
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }
    Ok(())
}

/// Writes an uploaded featured image under `upload_dir` and returns the
/// reference path stored on the post.
pub fn store_upload(
    upload_dir: &Path,
    original_name: &str,
    mime_type: &str,
    data: &[u8],
    max_size: usize,
) -> ServiceResult<String> {
    check_upload(mime_type, data.len(), max_size)?;

    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let filename = if extension.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        format!("{}.{}", Uuid::new_v4(), extension)
    };

    std::fs::create_dir_all(upload_dir)?;
    std::fs::write(upload_dir.join(&filename), data)?;

    tracing::info!("Stored upload {} ({} bytes) as {}", original_name, data.len(), filename);
    Ok(format!("{}/{}", UPLOADS_PREFIX, filename))
}

/// Deletes the file behind a `/uploads/<file>` reference. A file that is
/// already gone is not an error.
pub fn remove_upload(upload_dir: &Path, reference: &str) -> ServiceResult<()> {
    let filename = reference
        .strip_prefix(UPLOADS_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|name| !name.is_empty() && *name != "." && *name != ".." && !name.contains(['/', '\\']))
        .ok_or_else(|| ServiceError::validation(format!("Not an upload reference: {}", reference)))?;

    match std::fs::remove_file(upload_dir.join(filename)) {
        Ok(()) => {
            tracing::debug!("Removed upload {}", filename);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
