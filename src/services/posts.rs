use crate::models::{CreatePost, Post, PostFilter, PostStatus, UpdatePost};
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::read_time::estimate_read_time;
use crate::services::seo::{score_post, SeoReport};
use crate::services::slug::{generate_slug, validate_slug, MAX_SLUG_LEN};
use crate::Database;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

const POST_COLUMNS: &str = "id, title, slug, author_name, author_id, category, tags, featured_image, meta_title, meta_description, content, status, read_time, published_date, seo_keywords, views_count, is_featured, created_at, updated_at";

const NOT_FOUND: ServiceError = ServiceError::NotFound("Blog");

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    pub total: i64,
    pub draft: i64,
    pub published: i64,
    pub archived: i64,
}

pub fn create_post(db: &Database, input: CreatePost) -> ServiceResult<Post> {
    let title = required(&input.title, "Title")?;
    let author_name = required(&input.author_name, "Author name")?;
    let author_id = required(&input.author_id, "Author ID")?;
    let category = required(&input.category, "Category")?;
    if input.content.trim().is_empty() {
        return Err(ServiceError::validation("Content is required"));
    }

    let slug = match input.slug.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(manual) => normalize_slug(manual)?,
        None => normalize_slug(&title)?,
    };

    let conn = db.get()?;
    if slug_taken(&conn, &slug, None)? {
        return Err(ServiceError::slug_taken());
    }

    let now = Utc::now();
    let mut post = Post {
        id: 0,
        title,
        slug,
        author_name,
        author_id,
        category,
        tags: input.tags,
        featured_image: non_blank(input.featured_image),
        meta_title: non_blank(input.meta_title),
        meta_description: non_blank(input.meta_description),
        read_time: estimate_read_time(&input.content),
        content: input.content,
        status: input.status,
        published_date: None,
        seo_keywords: input.seo_keywords,
        views_count: 0,
        is_featured: input.is_featured,
        created_at: now,
        updated_at: now,
    };
    post.mark_published_if_first(now);

    conn.execute(
        r#"
        INSERT INTO posts (title, slug, author_name, author_id, category, tags, featured_image, meta_title, meta_description, content, status, read_time, published_date, seo_keywords, views_count, is_featured, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        rusqlite::params![
            &post.title,
            &post.slug,
            &post.author_name,
            &post.author_id,
            &post.category,
            serde_json::to_string(&post.tags)?,
            &post.featured_image,
            &post.meta_title,
            &post.meta_description,
            &post.content,
            post.status.to_string(),
            post.read_time,
            post.published_date,
            serde_json::to_string(&post.seo_keywords)?,
            post.views_count,
            post.is_featured,
            post.created_at,
            post.updated_at,
        ],
    )?;
    post.id = conn.last_insert_rowid();

    tracing::info!("Created post id={} slug={}", post.id, post.slug);
    Ok(post)
}

pub fn update_post(db: &Database, id: i64, input: UpdatePost) -> ServiceResult<Post> {
    let conn = db.get()?;
    let mut post = fetch_post(&conn, id)?.ok_or(NOT_FOUND)?;
    let now = Utc::now();

    if let Some(title) = input.title {
        post.title = required(&title, "Title")?;
    }
    if let Some(author_name) = input.author_name {
        post.author_name = required(&author_name, "Author name")?;
    }
    if let Some(author_id) = input.author_id {
        post.author_id = required(&author_id, "Author ID")?;
    }
    if let Some(category) = input.category {
        post.category = required(&category, "Category")?;
    }
    if let Some(slug) = input.slug {
        let slug = normalize_slug(&slug)?;
        if slug != post.slug {
            if slug_taken(&conn, &slug, Some(id))? {
                return Err(ServiceError::slug_taken());
            }
            post.slug = slug;
        }
    }
    if let Some(content) = input.content {
        if content.trim().is_empty() {
            return Err(ServiceError::validation("Content is required"));
        }
        if content != post.content {
            post.read_time = estimate_read_time(&content);
            post.content = content;
        }
    }
    if let Some(tags) = input.tags {
        post.tags = tags;
    }
    if let Some(keywords) = input.seo_keywords {
        post.seo_keywords = keywords;
    }
    if input.featured_image.is_some() {
        post.featured_image = non_blank(input.featured_image);
    }
    if input.meta_title.is_some() {
        post.meta_title = non_blank(input.meta_title);
    }
    if input.meta_description.is_some() {
        post.meta_description = non_blank(input.meta_description);
    }
    if let Some(is_featured) = input.is_featured {
        post.is_featured = is_featured;
    }
    if let Some(status) = input.status {
        post.status = status;
        post.mark_published_if_first(now);
    }
    post.updated_at = now;

    conn.execute(
        r#"
        UPDATE posts SET title = ?, slug = ?, author_name = ?, author_id = ?, category = ?, tags = ?, featured_image = ?, meta_title = ?, meta_description = ?, content = ?, status = ?, read_time = ?, published_date = ?, seo_keywords = ?, is_featured = ?, updated_at = ?
        WHERE id = ?
        "#,
        rusqlite::params![
            &post.title,
            &post.slug,
            &post.author_name,
            &post.author_id,
            &post.category,
            serde_json::to_string(&post.tags)?,
            &post.featured_image,
            &post.meta_title,
            &post.meta_description,
            &post.content,
            post.status.to_string(),
            post.read_time,
            post.published_date,
            serde_json::to_string(&post.seo_keywords)?,
            post.is_featured,
            post.updated_at,
            id,
        ],
    )?;

    tracing::debug!("Updated post id={}", id);
    Ok(post)
}

pub fn delete_post(db: &Database, id: i64) -> ServiceResult<()> {
    let conn = db.get()?;
    let deleted = conn.execute("DELETE FROM posts WHERE id = ?", [id])?;
    if deleted == 0 {
        return Err(NOT_FOUND);
    }
    tracing::info!("Deleted post id={}", id);
    Ok(())
}

pub fn get_post(db: &Database, id: i64) -> ServiceResult<Option<Post>> {
    let conn = db.get()?;
    Ok(fetch_post(&conn, id)?)
}

pub fn get_post_by_slug(db: &Database, slug: &str) -> ServiceResult<Option<Post>> {
    let conn = db.get()?;
    let post = conn
        .query_row(
            &format!("SELECT {} FROM posts WHERE slug = ?", POST_COLUMNS),
            [slug],
            row_to_post,
        )
        .optional()?;
    Ok(post)
}

/// Newest first. `search` matches title or author name, case-insensitively.
pub fn list_posts(db: &Database, filter: &PostFilter) -> ServiceResult<Vec<Post>> {
    let conn = db.get()?;

    let mut sql = format!("SELECT {} FROM posts WHERE 1=1", POST_COLUMNS);
    let mut params: Vec<String> = Vec::new();

    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        params.push(status.to_string());
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        sql.push_str(" AND (instr(unicode_lower(title), unicode_lower(?)) > 0 OR instr(unicode_lower(author_name), unicode_lower(?)) > 0)");
        params.push(search.to_string());
        params.push(search.to_string());
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let posts = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), row_to_post)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(posts)
}

pub fn status_counts(db: &Database) -> ServiceResult<StatusCounts> {
    let conn = db.get()?;
    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM posts GROUP BY status")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut counts = StatusCounts::default();
    for (status, n) in rows {
        counts.total += n;
        match status.parse() {
            Ok(PostStatus::Draft) => counts.draft += n,
            Ok(PostStatus::Published) => counts.published += n,
            Ok(PostStatus::Archived) => counts.archived += n,
            Err(()) => tracing::warn!("Unknown post status in storage: {}", status),
        }
    }
    Ok(counts)
}

pub fn toggle_publish(db: &Database, id: i64) -> ServiceResult<Post> {
    let conn = db.get()?;
    let mut post = fetch_post(&conn, id)?.ok_or(NOT_FOUND)?;
    post.toggle_publish(Utc::now());

    conn.execute(
        "UPDATE posts SET status = ?, published_date = ?, updated_at = ? WHERE id = ?",
        rusqlite::params![post.status.to_string(), post.published_date, post.updated_at, id],
    )?;

    tracing::info!("Post id={} is now {}", id, post.status);
    Ok(post)
}

/// Atomic counter bump in storage. Every call counts.
pub fn increment_views(db: &Database, id: i64) -> ServiceResult<Post> {
    let conn = db.get()?;
    let updated = conn.execute(
        "UPDATE posts SET views_count = views_count + 1, updated_at = ? WHERE id = ?",
        rusqlite::params![Utc::now(), id],
    )?;
    if updated == 0 {
        return Err(NOT_FOUND);
    }
    fetch_post(&conn, id)?.ok_or(NOT_FOUND)
}

/// Whether `slug` is free, ignoring the post `exclude_id` (its own slug in
/// edit flows). The candidate is normalized the way stored slugs are.
pub fn is_slug_available(db: &Database, slug: &str, exclude_id: Option<i64>) -> ServiceResult<bool> {
    let normalized = generate_slug(slug);
    if normalized.is_empty() {
        return Ok(false);
    }
    let conn = db.get()?;
    Ok(!slug_taken(&conn, &normalized, exclude_id)?)
}

pub fn seo_report(db: &Database, id: i64) -> ServiceResult<SeoReport> {
    let post = get_post(db, id)?.ok_or(NOT_FOUND)?;
    Ok(score_post(&post))
}

fn required(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_slug(raw: &str) -> ServiceResult<String> {
    let slug = generate_slug(raw);
    if slug.is_empty() {
        return Err(ServiceError::validation("Slug is required"));
    }
    if !validate_slug(&slug) {
        return Err(ServiceError::validation(format!(
            "Invalid slug: must be 1-{} characters, lowercase letters, numbers, and hyphens only",
            MAX_SLUG_LEN
        )));
    }
    Ok(slug)
}

fn slug_taken(conn: &Connection, slug: &str, exclude_id: Option<i64>) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = ?1 AND (?2 IS NULL OR id != ?2))",
        rusqlite::params![slug, exclude_id],
        |row| row.get(0),
    )
}

fn fetch_post(conn: &Connection, id: i64) -> rusqlite::Result<Option<Post>> {
    conn.query_row(
        &format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS),
        [id],
        row_to_post,
    )
    .optional()
}

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
    let tags: Vec<String> = serde_json::from_str(&row.get::<_, String>(6)?).unwrap_or_default();
    let seo_keywords: Vec<String> =
        serde_json::from_str(&row.get::<_, String>(14)?).unwrap_or_default();

    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        author_name: row.get(3)?,
        author_id: row.get(4)?,
        category: row.get(5)?,
        tags,
        featured_image: row.get(7)?,
        meta_title: row.get(8)?,
        meta_description: row.get(9)?,
        content: row.get(10)?,
        status: row
            .get::<_, String>(11)?
            .parse()
            .unwrap_or(PostStatus::Draft),
        read_time: row.get(12)?,
        published_date: row.get(13)?,
        seo_keywords,
        views_count: row.get(15)?,
        is_featured: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}
