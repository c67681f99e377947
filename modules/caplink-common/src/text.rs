//! Text normalization shared by both sides of every caption comparison.
//!
//! The matcher compares store-side record text against scraped captions.
//! Both must pass through the exact same pipeline, in the same order, or
//! scores silently diverge — so the pipeline lives here as one pure function.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Longest normalized prefix that participates in a similarity comparison.
pub const MATCH_SNIPPET_LEN: usize = 200;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Strip diacritics and symbols, preserving case and whitespace.
///
/// NFKD decomposition followed by dropping every non-ASCII scalar turns
/// "café" into "cafe" and discards emoji entirely; the regex then removes
/// the remaining punctuation.
pub fn clean_text(text: &str) -> String {
    let ascii: String = text.nfkd().filter(char::is_ascii).collect();
    NON_WORD.replace_all(&ascii, "").into_owned()
}

/// Normalize and truncate text for matching: `clean_text`, then the first
/// [`MATCH_SNIPPET_LEN`] chars.
pub fn match_snippet(text: &str) -> String {
    clean_text(text).chars().take(MATCH_SNIPPET_LEN).collect()
}

/// Extract a post shortcode from its permalink: the last non-empty path
/// segment, e.g. `https://www.instagram.com/p/abc123/` -> `abc123`.
pub fn shortcode_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        assert_eq!(clean_text("café açaí"), "cafe acai");
        assert_eq!(clean_text("São Paulo"), "Sao Paulo");
    }

    #[test]
    fn strips_punctuation_keeps_case_and_whitespace() {
        assert_eq!(clean_text("Hello, World!!"), "Hello World");
        assert_eq!(clean_text("a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn drops_emoji() {
        assert_eq!(clean_text("launch day 🚀🎉"), "launch day ");
    }

    #[test]
    fn snippet_truncates_after_normalization() {
        let text = "x!".repeat(300);
        let snippet = match_snippet(&text);
        assert_eq!(snippet.chars().count(), MATCH_SNIPPET_LEN);
        assert!(snippet.chars().all(|c| c == 'x'));
    }

    #[test]
    fn punctuation_only_text_normalizes_to_empty() {
        assert_eq!(match_snippet("!!! ??? ..."), "  ");
        assert_eq!(clean_text("!?."), "");
    }

    #[test]
    fn shortcode_is_last_nonempty_segment() {
        assert_eq!(shortcode_from_url("https://www.instagram.com/p/abc123/"), "abc123");
        assert_eq!(shortcode_from_url("https://x/p/abc"), "abc");
    }
}
