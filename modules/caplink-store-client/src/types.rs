use serde::{Deserialize, Serialize};

use caplink_common::PostRecord;

/// One poll's worth of records awaiting link resolution, all from the same
/// profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingBatch {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub result: Vec<StoredPost>,
}

/// A post as the internal store holds it. The store keeps an edit history
/// per post; the first revision carries the text and author fields used
/// here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPost {
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub post_history: Vec<PostRevision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_shortcode: Option<String>,
    #[serde(default)]
    pub terms: Vec<String>,
}

impl StoredPost {
    /// Caption/body text used for matching: the first revision's, else empty.
    pub fn text(&self) -> &str {
        self.post_history
            .first()
            .map(|r| r.body.text.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRevision {
    #[serde(default)]
    pub body: PostBody,
    #[serde(default)]
    pub metadata: RevisionMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub author_nick_name: String,
    #[serde(default)]
    pub author_url: String,
    #[serde(default)]
    pub author_image: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub reply: bool,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub is_sponsored: bool,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub media: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionMetadata {
    #[serde(default)]
    pub stats: PostStats,
    #[serde(default)]
    pub collect: CollectInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostStats {
    #[serde(default)]
    pub like: i64,
    #[serde(default)]
    pub comment: i64,
    #[serde(default)]
    pub seen: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectInfo {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Map stored posts to the engine's record type.
pub fn to_records(posts: &[StoredPost]) -> Vec<PostRecord> {
    posts
        .iter()
        .map(|p| PostRecord::new(p.post_id.clone(), p.text()))
        .collect()
}

/// Write resolved permalinks back into the stored posts, matching by id.
/// Unresolved records leave their posts untouched.
pub fn apply_resolution(posts: &mut [StoredPost], records: &[PostRecord]) {
    for post in posts.iter_mut() {
        let Some(record) = records.iter().find(|r| r.id == post.post_id) else {
            continue;
        };
        if !record.is_resolved() {
            continue;
        }
        if let Some(revision) = post.post_history.first_mut() {
            revision.body.post_url = record.resolved_url.clone();
        }
        post.post_shortcode = record.resolved_shortcode.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: &str, text: &str) -> StoredPost {
        StoredPost {
            post_id: id.to_string(),
            post_history: vec![PostRevision {
                body: PostBody {
                    text: text.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn batch_deserializes_from_store_shape() {
        let batch: PendingBatch = serde_json::from_value(serde_json::json!({
            "total": 1,
            "username": "someone",
            "result": [{
                "postId": "p1",
                "postHistory": [{
                    "body": { "text": "Hello World", "authorName": "Some One" },
                    "metadata": { "stats": { "like": 3, "comment": 1, "seen": 9 } }
                }],
                "terms": ["launch"]
            }]
        }))
        .unwrap();

        assert_eq!(batch.username, "someone");
        let post = &batch.result[0];
        assert_eq!(post.post_id, "p1");
        assert_eq!(post.text(), "Hello World");
        assert_eq!(post.post_history[0].metadata.stats.like, 3);
        assert_eq!(post.terms, vec!["launch"]);
    }

    #[test]
    fn text_of_historyless_post_is_empty() {
        let post = StoredPost::default();
        assert_eq!(post.text(), "");
    }

    #[test]
    fn records_mirror_stored_posts() {
        let posts = vec![stored("p1", "first"), stored("p2", "second")];
        let records = to_records(&posts);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "p1");
        assert_eq!(records[1].text, "second");
        assert!(!records[0].is_resolved());
    }

    #[test]
    fn resolution_written_back_by_id() {
        let mut posts = vec![stored("p1", "first"), stored("p2", "second")];
        let mut records = to_records(&posts);
        records[1].accept("https://www.instagram.com/p/abc123/");

        apply_resolution(&mut posts, &records);

        assert_eq!(posts[0].post_shortcode, None);
        assert_eq!(posts[0].post_history[0].body.post_url, None);
        assert_eq!(posts[1].post_shortcode.as_deref(), Some("abc123"));
        assert_eq!(
            posts[1].post_history[0].body.post_url.as_deref(),
            Some("https://www.instagram.com/p/abc123/")
        );
    }
}
