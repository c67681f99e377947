use crate::text::shortcode_from_url;

/// An internal post awaiting URL resolution. Owned by the caller and mutated
/// in place by the resolution engine: `resolved_url` is written at most once
/// per resolution pass, and only when an accepted match exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    /// Opaque identifier, unique within a batch.
    pub id: String,
    /// Free-form caption/body text used for matching. May be empty.
    pub text: String,
    pub resolved_url: Option<String>,
    pub resolved_shortcode: Option<String>,
}

impl PostRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            resolved_url: None,
            resolved_shortcode: None,
        }
    }

    /// Accept a match: set the permalink and derive its shortcode.
    pub fn accept(&mut self, url: &str) {
        self.resolved_url = Some(url.to_string());
        self.resolved_shortcode = Some(shortcode_from_url(url));
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_url.is_some()
    }
}

/// A post pulled from the live profile scan. Read-only, never persisted.
/// Only posts with a non-empty caption participate in matching.
#[derive(Debug, Clone)]
pub struct ScrapedPost {
    pub caption: Option<String>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_sets_url_and_shortcode() {
        let mut record = PostRecord::new("1", "hello");
        record.accept("https://www.instagram.com/p/abc123/");
        assert_eq!(
            record.resolved_url.as_deref(),
            Some("https://www.instagram.com/p/abc123/")
        );
        assert_eq!(record.resolved_shortcode.as_deref(), Some("abc123"));
        assert!(record.is_resolved());
    }

    #[test]
    fn new_record_is_unresolved() {
        let record = PostRecord::new("1", "hello");
        assert!(!record.is_resolved());
        assert_eq!(record.resolved_shortcode, None);
    }
}
