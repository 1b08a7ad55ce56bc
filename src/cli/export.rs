use crate::models::{PostFilter, PostStatus};
use crate::services::posts;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, output: &Path, include_drafts: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;

    let filter = PostFilter {
        status: if include_drafts {
            None
        } else {
            Some(PostStatus::Published)
        },
        search: None,
    };
    let posts = posts::list_posts(&db, &filter)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, serde_json::to_string_pretty(&posts)?)?;

    tracing::info!("Exported {} posts to {}", posts.len(), output.display());
    Ok(())
}
