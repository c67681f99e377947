//! Textual rate-limit classification.
//!
//! The post source surfaces upstream failures as human-readable messages,
//! not typed errors, so classification is substring matching on the
//! rendered error text. Any text containing "429" classifies as rate
//! limiting, related or not — a known limitation of the heuristic.

/// Markers whose presence (case-insensitive) marks an error as rate limiting.
const RATE_LIMIT_MARKERS: &[&str] = &[
    "please wait a few minutes before you try again",
    "429",
    "too many requests",
    "401 unauthorized",
];

/// Returns true when the error text reads like a rate-limit or auth-throttle
/// response. Rate-limited attempts are retried; everything else aborts.
pub fn is_rate_limited(text: &str) -> bool {
    let text = text.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_marker() {
        assert!(is_rate_limited("Please wait a few minutes before you try again."));
        assert!(is_rate_limited("HTTP error 429"));
        assert!(is_rate_limited("Too Many Requests"));
        assert!(is_rate_limited("401 Unauthorized"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_rate_limited("TOO MANY REQUESTS"));
        assert!(is_rate_limited("too many requests"));
    }

    #[test]
    fn unrelated_429_substring_still_classifies() {
        // Documented limitation of the textual heuristic.
        assert!(is_rate_limited("item 4290 missing"));
    }

    #[test]
    fn plain_network_errors_do_not_classify() {
        assert!(!is_rate_limited("connection reset"));
        assert!(!is_rate_limited("Profile not found: someone"));
        assert!(!is_rate_limited(""));
    }
}
