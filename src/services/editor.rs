//! Form state for creating and editing a post.
//!
//! Holds the draft fields together with the flags that decide when derived
//! values (slug, read time) are recomputed, so the admin UI can drive it
//! without keeping its own ambient state.

use crate::models::{split_list, CreatePost, Post, PostStatus, UpdatePost};
use crate::services::read_time::{estimate_read_time, word_count};
use crate::services::seo::{self, SeoInput, SeoReport};
use crate::services::slug::{generate_slug, sanitize_slug_input};
use std::collections::BTreeMap;

pub const META_TITLE_MAX: usize = 60;
pub const META_DESCRIPTION_MAX: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Edit { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugCheck {
    #[default]
    Unchecked,
    Available,
    Taken,
}

pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug)]
pub enum Submission {
    Create(CreatePost),
    Update { id: i64, input: UpdatePost },
}

#[derive(Debug, Clone)]
pub struct PostEditor {
    mode: EditorMode,
    slug_manually_edited: bool,
    slug_check: SlugCheck,
    title: String,
    slug: String,
    content: String,
    read_time: u32,
    meta_title: String,
    meta_description: String,
    tags: Vec<String>,
    seo_keywords: Vec<String>,
    pub author_name: String,
    pub author_id: String,
    pub category: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub is_featured: bool,
}

impl Default for PostEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostEditor {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::New,
            slug_manually_edited: false,
            slug_check: SlugCheck::Unchecked,
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            read_time: 0,
            meta_title: String::new(),
            meta_description: String::new(),
            tags: Vec::new(),
            seo_keywords: Vec::new(),
            author_name: String::new(),
            author_id: String::new(),
            category: String::new(),
            featured_image: None,
            status: PostStatus::Draft,
            is_featured: false,
        }
    }

    /// Loads a stored post. Slug auto-derivation never runs in edit mode.
    pub fn edit(post: &Post) -> Self {
        Self {
            mode: EditorMode::Edit { id: post.id },
            slug_manually_edited: !post.slug.is_empty(),
            slug_check: SlugCheck::Unchecked,
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            read_time: estimate_read_time(&post.content),
            meta_title: post.meta_title.clone().unwrap_or_default(),
            meta_description: post.meta_description.clone().unwrap_or_default(),
            tags: post.tags.clone(),
            seo_keywords: post.seo_keywords.clone(),
            author_name: post.author_name.clone(),
            author_id: post.author_id.clone(),
            category: post.category.clone(),
            featured_image: post.featured_image.clone(),
            status: post.status,
            is_featured: post.is_featured,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    pub fn slug_manually_edited(&self) -> bool {
        self.slug_manually_edited
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn read_time(&self) -> u32 {
        self.read_time
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    pub fn meta_title(&self) -> &str {
        &self.meta_title
    }

    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn seo_keywords(&self) -> &[String] {
        &self.seo_keywords
    }

    pub fn slug_check(&self) -> SlugCheck {
        self.slug_check
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if !self.title.is_empty() && !self.slug_manually_edited && !self.is_edit() {
            self.replace_slug(generate_slug(&self.title));
        }
    }

    /// A direct edit of the slug field. Disables auto-derivation for the
    /// rest of the session.
    pub fn set_slug(&mut self, raw: &str) {
        self.replace_slug(sanitize_slug_input(raw));
        self.slug_manually_edited = true;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.read_time = estimate_read_time(&self.content);
    }

    pub fn set_meta_title(&mut self, value: &str) {
        self.meta_title = value.chars().take(META_TITLE_MAX).collect();
    }

    pub fn set_meta_description(&mut self, value: &str) {
        self.meta_description = value.chars().take(META_DESCRIPTION_MAX).collect();
    }

    pub fn set_tags(&mut self, raw: &str) {
        self.tags = split_list(raw);
    }

    pub fn set_keywords(&mut self, raw: &str) {
        self.seo_keywords = split_list(raw);
    }

    /// Records the result of an availability lookup. Results for a slug
    /// the field no longer holds are dropped.
    pub fn record_slug_check(&mut self, slug: &str, available: bool) {
        if slug != self.slug {
            return;
        }
        self.slug_check = if available {
            SlugCheck::Available
        } else {
            SlugCheck::Taken
        };
    }

    pub fn can_submit(&self) -> bool {
        self.slug_check != SlugCheck::Taken
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut require = |field: &'static str, value: &str, message: &str| {
            if value.trim().is_empty() {
                errors.insert(field, message.to_string());
            }
        };
        require("title", &self.title, "Title is required");
        require("slug", &self.slug, "Slug is required");
        require("authorName", &self.author_name, "Author name is required");
        require("authorId", &self.author_id, "Author ID is required");
        require("category", &self.category, "Category is required");
        require("content", &self.content, "Content is required");

        if self.slug_check == SlugCheck::Taken {
            errors.insert("slug", "Slug must be unique".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn seo_report(&self) -> SeoReport {
        seo::score(SeoInput {
            meta_title: Some(&self.meta_title),
            meta_description: Some(&self.meta_description),
            seo_keywords: &self.seo_keywords,
            content: &self.content,
            featured_image: self.featured_image.as_deref(),
        })
    }

    pub fn submission(self) -> Result<Submission, FieldErrors> {
        self.validate()?;

        Ok(match self.mode {
            EditorMode::New => Submission::Create(CreatePost {
                title: self.title,
                slug: Some(self.slug),
                author_name: self.author_name,
                author_id: self.author_id,
                category: self.category,
                tags: self.tags,
                featured_image: self.featured_image,
                meta_title: Some(self.meta_title),
                meta_description: Some(self.meta_description),
                content: self.content,
                status: self.status,
                seo_keywords: self.seo_keywords,
                is_featured: self.is_featured,
            }),
            EditorMode::Edit { id } => Submission::Update {
                id,
                input: UpdatePost {
                    title: Some(self.title),
                    slug: Some(self.slug),
                    author_name: Some(self.author_name),
                    author_id: Some(self.author_id),
                    category: Some(self.category),
                    tags: Some(self.tags),
                    featured_image: Some(self.featured_image.unwrap_or_default()),
                    meta_title: Some(self.meta_title),
                    meta_description: Some(self.meta_description),
                    content: Some(self.content),
                    status: Some(self.status),
                    seo_keywords: Some(self.seo_keywords),
                    is_featured: Some(self.is_featured),
                },
            },
        })
    }

    fn replace_slug(&mut self, slug: String) {
        if slug != self.slug {
            self.slug = slug;
            self.slug_check = SlugCheck::Unchecked;
        }
    }
}

/// One rendering of a post preview. Counts at most one view no matter how
/// often the preview re-renders; a fresh page load starts a new session.
#[derive(Debug, Clone, Copy)]
pub struct PreviewSession {
    post_id: i64,
    counted: bool,
}

impl PreviewSession {
    pub fn new(post_id: i64) -> Self {
        Self {
            post_id,
            counted: false,
        }
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    /// True the first time only.
    pub fn take_view(&mut self) -> bool {
        !std::mem::replace(&mut self.counted, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_derives_slug_until_manual_edit() {
        let mut editor = PostEditor::new();
        editor.set_title("Hello, World! 2024");
        assert_eq!(editor.slug(), "hello-world-2024");

        editor.set_slug("My-Custom Slug!");
        assert_eq!(editor.slug(), "my-customslug");
        assert!(editor.slug_manually_edited());

        editor.set_title("Another Title");
        assert_eq!(editor.slug(), "my-customslug");
    }

    fn stored_post() -> Post {
        let now = chrono::Utc::now();
        Post {
            id: 7,
            title: "Original".to_string(),
            slug: "original".to_string(),
            author_name: "Ada".to_string(),
            author_id: "1".to_string(),
            category: "News".to_string(),
            tags: vec![],
            featured_image: None,
            meta_title: None,
            meta_description: None,
            content: "body".to_string(),
            status: PostStatus::Draft,
            read_time: 1,
            published_date: None,
            seo_keywords: vec![],
            views_count: 0,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_edit_mode_never_derives_slug() {
        let mut editor = PostEditor::edit(&stored_post());
        editor.set_title("Renamed");
        assert_eq!(editor.slug(), "original");
        assert_eq!(editor.mode(), EditorMode::Edit { id: 7 });

        match editor.submission().unwrap() {
            Submission::Update { id, input } => {
                assert_eq!(id, 7);
                assert_eq!(input.title.as_deref(), Some("Renamed"));
                assert_eq!(input.slug.as_deref(), Some("original"));
            }
            Submission::Create(_) => panic!("expected update"),
        }
    }

    #[test]
    fn test_new_post_submission() {
        let mut editor = PostEditor::new();
        editor.set_title("First Post");
        editor.set_content("<p>hi</p>");
        editor.author_name = "Ada".to_string();
        editor.author_id = "1".to_string();
        editor.category = "News".to_string();

        match editor.submission().unwrap() {
            Submission::Create(input) => {
                assert_eq!(input.slug.as_deref(), Some("first-post"));
                assert_eq!(input.status, PostStatus::Draft);
            }
            Submission::Update { .. } => panic!("expected create"),
        }
    }

    #[test]
    fn test_content_updates_read_time() {
        let mut editor = PostEditor::new();
        assert_eq!(editor.read_time(), 0);
        editor.set_content(vec!["w"; 401].join(" "));
        assert_eq!(editor.read_time(), 3);
        editor.set_content("");
        assert_eq!(editor.read_time(), 0);
    }

    #[test]
    fn test_meta_fields_are_capped() {
        let mut editor = PostEditor::new();
        editor.set_meta_title(&"t".repeat(80));
        editor.set_meta_description(&"d".repeat(200));
        assert_eq!(editor.meta_title().chars().count(), META_TITLE_MAX);
        assert_eq!(editor.meta_description().chars().count(), META_DESCRIPTION_MAX);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let editor = PostEditor::new();
        let errors = editor.validate().unwrap_err();
        assert_eq!(errors.get("title").unwrap(), "Title is required");
        assert_eq!(errors.get("slug").unwrap(), "Slug is required");
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_taken_slug_blocks_submission() {
        let mut editor = PostEditor::new();
        editor.set_title("Taken");
        editor.record_slug_check("taken", false);
        assert!(!editor.can_submit());
        assert_eq!(editor.validate().unwrap_err().get("slug").unwrap(), "Slug must be unique");

        editor.set_title("Taken Again");
        assert_eq!(editor.slug_check(), SlugCheck::Unchecked);
        assert!(editor.can_submit());
    }

    #[test]
    fn test_stale_slug_check_is_ignored() {
        let mut editor = PostEditor::new();
        editor.set_title("Current");
        editor.record_slug_check("previous", false);
        assert_eq!(editor.slug_check(), SlugCheck::Unchecked);
    }

    #[test]
    fn test_tags_and_keywords_split_on_commas() {
        let mut editor = PostEditor::new();
        editor.set_tags("rust, web ,, cms");
        editor.set_keywords("seo");
        assert_eq!(editor.tags(), ["rust", "web", "cms"]);
        assert_eq!(editor.seo_keywords(), ["seo"]);
    }

    #[test]
    fn test_preview_counts_once() {
        let mut session = PreviewSession::new(3);
        assert!(session.take_view());
        assert!(!session.take_view());
        assert_eq!(session.post_id(), 3);
    }
}
