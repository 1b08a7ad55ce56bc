use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Bodies and query strings accept the same spellings, any case.
impl<'de> Deserialize<'de> for PostStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown status '{}'", raw)))
    }
}

impl FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Published => write!(f, "Published"),
            Self::Archived => write!(f, "Archived"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author_name: String,
    pub author_id: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub content: String,
    pub status: PostStatus,
    pub read_time: u32,
    pub published_date: Option<DateTime<Utc>>,
    pub seo_keywords: Vec<String>,
    pub views_count: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Flips Published to Draft and anything else to Published.
    ///
    /// `published_date` is only ever written on the first transition into
    /// Published; unpublishing keeps it.
    pub fn toggle_publish(&mut self, now: DateTime<Utc>) {
        self.status = match self.status {
            PostStatus::Published => PostStatus::Draft,
            PostStatus::Draft | PostStatus::Archived => PostStatus::Published,
        };
        self.mark_published_if_first(now);
        self.updated_at = now;
    }

    /// Sets `published_date` when the post is Published and has never been.
    pub fn mark_published_if_first(&mut self, now: DateTime<Utc>) {
        if self.status == PostStatus::Published && self.published_date.is_none() {
            self.published_date = Some(now);
        }
    }

    /// In-memory view bump. Storage does the same with a single UPDATE.
    pub fn record_view(&mut self, now: DateTime<Utc>) {
        self.views_count = self.views_count.saturating_add(1);
        self.updated_at = now;
    }
}

/// A new post as submitted. Missing fields default to empty and are
/// rejected by validation rather than by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub slug: Option<String>,
    pub author_name: String,
    pub author_id: String,
    pub category: String,
    #[serde(deserialize_with = "list_or_csv")]
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub content: String,
    pub status: PostStatus,
    #[serde(deserialize_with = "list_or_csv")]
    pub seo_keywords: Vec<String>,
    pub is_featured: bool,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub author_name: Option<String>,
    pub author_id: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "opt_list_or_csv")]
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    #[serde(default, deserialize_with = "opt_list_or_csv")]
    pub seo_keywords: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub search: Option<String>,
}

/// Splits a comma-separated form value, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    List(Vec<String>),
    Csv(String),
}

impl ListInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Csv(raw) => split_list(&raw),
        }
    }
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ListInput::deserialize(deserializer)?.into_vec())
}

fn opt_list_or_csv<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ListInput>::deserialize(deserializer)?.map(ListInput::into_vec))
}
