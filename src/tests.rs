#[cfg(test)]
mod tests {

    mod slug_tests {
        use crate::services::slug::{generate_slug, sanitize_slug_input, validate_slug};

        #[test]
        fn test_generate_slug_basic() {
            assert_eq!(generate_slug("Hello World"), "hello-world");
        }

        #[test]
        fn test_generate_slug_punctuation_and_numbers() {
            assert_eq!(generate_slug("Hello, World! 2024"), "hello-world-2024");
        }

        #[test]
        fn test_generate_slug_strips_rather_than_splits() {
            assert_eq!(generate_slug("Don't Panic"), "dont-panic");
            assert_eq!(generate_slug("v1.2 release"), "v12-release");
        }

        #[test]
        fn test_generate_slug_multiple_spaces() {
            assert_eq!(generate_slug("Hello   World"), "hello-world");
            assert_eq!(generate_slug("tabs\tand\nnewlines"), "tabs-and-newlines");
        }

        #[test]
        fn test_generate_slug_collapses_and_trims_hyphens() {
            assert_eq!(generate_slug("  --Hello -- World--  "), "hello-world");
            assert_eq!(generate_slug("a - - b"), "a-b");
        }

        #[test]
        fn test_generate_slug_drops_non_ascii_and_underscores() {
            assert_eq!(generate_slug("snake_case title"), "snakecase-title");
            assert_eq!(generate_slug("Café au lait"), "caf-au-lait");
            assert_eq!(generate_slug("日本語"), "");
        }

        #[test]
        fn test_generate_slug_is_idempotent() {
            let titles = [
                "Hello, World! 2024",
                "  --Edge__Case-- ",
                "Ünïcödé & Symbols #1",
                "already-a-slug",
                "   ",
                "-",
                "Mixed   CASE---and   spaces",
            ];
            for title in titles {
                let once = generate_slug(title);
                assert_eq!(generate_slug(&once), once, "title: {:?}", title);
            }
        }

        #[test]
        fn test_generate_slug_charset() {
            let titles = ["A!b@c#d$", "--x--", "Ärger über Öl", "1 2 3", "a_b-c d"];
            for title in titles {
                let slug = generate_slug(title);
                assert!(slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                assert!(!slug.starts_with('-'));
                assert!(!slug.ends_with('-'));
                assert!(!slug.contains("--"));
            }
        }

        #[test]
        fn test_sanitize_slug_input() {
            assert_eq!(sanitize_slug_input("My Slug!"), "myslug");
            assert_eq!(sanitize_slug_input("keep_under-score"), "keep_under-score");
        }

        #[test]
        fn test_validate_slug() {
            assert!(validate_slug("hello-world"));
            assert!(validate_slug("my-blog-post-2024"));
            assert!(!validate_slug(""));
            assert!(!validate_slug("Hello-World"));
            assert!(!validate_slug("hello_world"));
            assert!(!validate_slug("-leading"));
            assert!(validate_slug(&"a".repeat(200)));
            assert!(!validate_slug(&"a".repeat(201)));
        }
    }

    mod read_time_tests {
        use crate::services::read_time::{estimate_read_time, word_count};

        fn words(n: usize) -> String {
            vec!["lorem"; n].join(" ")
        }

        #[test]
        fn test_empty_content_is_zero() {
            assert_eq!(estimate_read_time(""), 0);
        }

        #[test]
        fn test_word_boundaries() {
            assert_eq!(estimate_read_time(&words(1)), 1);
            assert_eq!(estimate_read_time(&words(200)), 1);
            assert_eq!(estimate_read_time(&words(201)), 2);
            assert_eq!(estimate_read_time(&words(400)), 2);
        }

        #[test]
        fn test_markup_is_not_counted() {
            let html = format!("<h1 class=\"title\">Heading</h1><p>{}</p>", words(199));
            assert_eq!(word_count(&html), 200);
            assert_eq!(estimate_read_time(&html), 1);
        }

        #[test]
        fn test_whitespace_only_content_reads_in_one_minute() {
            assert_eq!(estimate_read_time("   "), 1);
        }
    }

    mod seo_tests {
        use crate::services::seo::{score, SeoBand, SeoInput};

        fn words(n: usize) -> String {
            vec!["word"; n].join(" ")
        }

        #[test]
        fn test_all_checks_pass() {
            let keywords = vec!["rust".to_string()];
            let content = words(301);
            let report = score(SeoInput {
                meta_title: Some("Title"),
                meta_description: Some("Description"),
                seo_keywords: &keywords,
                content: &content,
                featured_image: Some("/uploads/cover.png"),
            });
            assert_eq!(report.score, 100);
            assert_eq!(report.band, SeoBand::Excellent);
            assert!(report.is_perfect());
            assert!(report.suggestions.is_empty());
            assert!(report.checks.iter().all(|c| c.passed));
        }

        #[test]
        fn test_nothing_passes() {
            let report = score(SeoInput::default());
            assert_eq!(report.score, 0);
            assert_eq!(report.band, SeoBand::NeedsImprovement);
            assert_eq!(report.suggestions.len(), 5);
            assert_eq!(
                report.suggestions,
                vec![
                    "Add a compelling meta title (50-60 characters)",
                    "Write a meta description (150-160 characters)",
                    "Include 3-5 relevant SEO keywords",
                    "Increase content length to at least 300 words",
                    "Upload an eye-catching featured image",
                ]
            );
        }

        #[test]
        fn test_each_check_is_worth_twenty() {
            let keywords = vec!["k".to_string()];
            let long = words(301);
            let inputs = [
                SeoInput { meta_title: Some("t"), ..Default::default() },
                SeoInput { meta_description: Some("d"), ..Default::default() },
                SeoInput { seo_keywords: &keywords, ..Default::default() },
                SeoInput { content: &long, ..Default::default() },
                SeoInput { featured_image: Some("/uploads/x.png"), ..Default::default() },
            ];
            for (i, input) in inputs.into_iter().enumerate() {
                let report = score(input);
                assert_eq!(report.score, 20, "check {}", i);
                assert!(report.checks[i].passed);
                assert_eq!(report.suggestions.len(), 4);
            }
        }

        #[test]
        fn test_good_band_scenario() {
            let keywords = vec!["rust".to_string()];
            let content = words(350);
            let report = score(SeoInput {
                meta_title: Some("A title"),
                meta_description: Some(""),
                seo_keywords: &keywords,
                content: &content,
                featured_image: None,
            });
            assert_eq!(report.score, 60);
            assert_eq!(report.band, SeoBand::Good);
            assert_eq!(report.band.to_string(), "Good");
            assert_eq!(report.checks[2].message, "1 keyword(s) added");
            assert_eq!(report.checks[3].message, "350 words (recommended: 300+)");
            assert_eq!(
                report.suggestions,
                vec![
                    "Write a meta description (150-160 characters)",
                    "Upload an eye-catching featured image",
                ]
            );
        }

        #[test]
        fn test_check_order_and_labels() {
            let report = score(SeoInput::default());
            let labels: Vec<_> = report.checks.iter().map(|c| c.label).collect();
            assert_eq!(
                labels,
                vec![
                    "Meta Title",
                    "Meta Description",
                    "SEO Keywords",
                    "Content Length",
                    "Featured Image",
                ]
            );
        }
    }
}
