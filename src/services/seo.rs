use crate::models::Post;
use crate::services::read_time::word_count;
use serde::{Deserialize, Serialize};

pub const POINTS_PER_CHECK: u32 = 20;
pub const MIN_CONTENT_WORDS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeoBand {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl SeoBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }
}

impl std::fmt::Display for SeoBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoCheck {
    pub label: &'static str,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoReport {
    pub score: u32,
    pub band: SeoBand,
    pub checks: Vec<SeoCheck>,
    pub suggestions: Vec<&'static str>,
}

impl SeoReport {
    pub fn is_perfect(&self) -> bool {
        self.score == POINTS_PER_CHECK * self.checks.len() as u32
    }
}

/// The fields the scorer looks at, borrowed from a stored post or an
/// unsaved draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoInput<'a> {
    pub meta_title: Option<&'a str>,
    pub meta_description: Option<&'a str>,
    pub seo_keywords: &'a [String],
    pub content: &'a str,
    pub featured_image: Option<&'a str>,
}

impl<'a> From<&'a Post> for SeoInput<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            meta_title: post.meta_title.as_deref(),
            meta_description: post.meta_description.as_deref(),
            seo_keywords: &post.seo_keywords,
            content: &post.content,
            featured_image: post.featured_image.as_deref(),
        }
    }
}

/// Body of `POST /api/seo/score`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDraft {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub seo_keywords: Vec<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
}

impl<'a> From<&'a SeoDraft> for SeoInput<'a> {
    fn from(draft: &'a SeoDraft) -> Self {
        Self {
            meta_title: draft.meta_title.as_deref(),
            meta_description: draft.meta_description.as_deref(),
            seo_keywords: &draft.seo_keywords,
            content: &draft.content,
            featured_image: draft.featured_image.as_deref(),
        }
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

struct Outcome {
    check: SeoCheck,
    suggestion: &'static str,
}

fn outcome(label: &'static str, passed: bool, message: String, suggestion: &'static str) -> Outcome {
    Outcome {
        check: SeoCheck {
            label,
            passed,
            message,
        },
        suggestion,
    }
}

/// Runs the five checks in their fixed order.
///
/// Content length counts words with markup stripped, the same count the
/// read-time estimate uses, so tags and attributes never add words.
pub fn score(input: SeoInput<'_>) -> SeoReport {
    let title_ok = present(input.meta_title);
    let description_ok = present(input.meta_description);
    let keywords = input.seo_keywords.len();
    let has_content = !input.content.trim().is_empty();
    let words = if has_content { word_count(input.content) } else { 0 };
    let image_ok = present(input.featured_image);

    let outcomes = [
        outcome(
            "Meta Title",
            title_ok,
            if title_ok { "Meta title is present" } else { "Meta title is missing" }.to_string(),
            "Add a compelling meta title (50-60 characters)",
        ),
        outcome(
            "Meta Description",
            description_ok,
            if description_ok {
                "Meta description is present"
            } else {
                "Meta description is missing"
            }
            .to_string(),
            "Write a meta description (150-160 characters)",
        ),
        outcome(
            "SEO Keywords",
            keywords > 0,
            if keywords > 0 {
                format!("{} keyword(s) added", keywords)
            } else {
                "No SEO keywords added".to_string()
            },
            "Include 3-5 relevant SEO keywords",
        ),
        outcome(
            "Content Length",
            words > MIN_CONTENT_WORDS,
            if has_content {
                format!("{} words (recommended: {}+)", words, MIN_CONTENT_WORDS)
            } else {
                "No content added".to_string()
            },
            "Increase content length to at least 300 words",
        ),
        outcome(
            "Featured Image",
            image_ok,
            if image_ok { "Featured image is present" } else { "Featured image is missing" }
                .to_string(),
            "Upload an eye-catching featured image",
        ),
    ];

    let score = outcomes.iter().filter(|o| o.check.passed).count() as u32 * POINTS_PER_CHECK;
    let suggestions = outcomes
        .iter()
        .filter(|o| !o.check.passed)
        .map(|o| o.suggestion)
        .collect();

    SeoReport {
        score,
        band: SeoBand::from_score(score),
        checks: outcomes.into_iter().map(|o| o.check).collect(),
        suggestions,
    }
}

pub fn score_post(post: &Post) -> SeoReport {
    score(SeoInput::from(post))
}
