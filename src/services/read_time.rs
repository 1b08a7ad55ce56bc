use once_cell::sync::Lazy;
use regex::Regex;

pub const WORDS_PER_MINUTE: usize = 200;

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex pattern"));

pub fn strip_tags(html: &str) -> String {
    TAG_REGEX.replace_all(html, " ").into_owned()
}

pub fn word_count(html: &str) -> usize {
    strip_tags(html).split_whitespace().count()
}

/// Minutes to read `html` at 200 words per minute, rounded up.
///
/// Empty content reads in 0 minutes; any other content in at least 1.
pub fn estimate_read_time(html: &str) -> u32 {
    if html.is_empty() {
        return 0;
    }
    let words = word_count(html);
    (words.div_ceil(WORDS_PER_MINUTE) as u32).max(1)
}
