use crate::services::posts;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, id: i64) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;

    let post = posts::get_post(&db, id)?
        .ok_or_else(|| anyhow::anyhow!("No post with id {}", id))?;
    let report = posts::seo_report(&db, id)?;

    println!("\n  {} ({})", post.title, post.slug);
    println!("  SEO score: {}/100 ({})\n", report.score, report.band);
    for check in &report.checks {
        let mark = if check.passed { "✓" } else { "✗" };
        println!("  {} {:<18} {}", mark, check.label, check.message);
    }
    if !report.suggestions.is_empty() {
        println!("\n  Recommendations:");
        for suggestion in &report.suggestions {
            println!("  - {}", suggestion);
        }
    }
    println!();

    Ok(())
}
