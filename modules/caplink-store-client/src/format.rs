//! Record-to-API remapping: flattens a stored post's first revision into
//! the flat shape the content-library ingest endpoint expects. Field names
//! and the fixed metadata values are dictated by that endpoint.

use serde::Serialize;

use crate::types::StoredPost;

#[derive(Debug, Clone, Serialize)]
pub struct FormattedPost {
    pub body: FormattedBody,
    pub metadata: FormattedMetadata,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBody {
    pub post_shortcode: String,
    pub name: String,
    pub time: String,
    pub likes: i64,
    pub message: String,
    pub profile_id: String,
    pub comment_id: String,
    pub username: String,
    pub parent_comment_id: String,
    pub replies: String,
    pub reply: bool,
    pub shortcode: String,
    pub reaction: String,
    pub is_video: bool,
    pub comments: i64,
    pub url: String,
    pub profile_url: String,
    pub video_view_count: i64,
    pub is_private_user: String,
    pub is_verified_user: String,
    pub display_url: String,
    pub followers_count: String,
    pub id: String,
    pub caption: String,
    pub thumbnail: String,
    pub accessibility_caption: String,
    pub comments_disabled: String,
    pub video_duration: String,
    pub is_sponsored: bool,
    pub location_name: String,
    pub media_count: String,
    pub media: Vec<serde_json::Value>,
    pub owner: String,
    pub profile_image: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedMetadata {
    pub theme: Option<String>,
    pub terms: Vec<String>,
    pub project: String,
    pub api_version: String,
}

/// Default project bucket for ingested posts.
const DEFAULT_PROJECT: &str = "uncategorized";

/// Reported collector version when the stored revision carries none.
const DEFAULT_API_VERSION: &str = "painel-ContentLibrary";

/// Flatten posts for the ingest endpoint. Posts with no revision history
/// carry nothing worth sending and are skipped.
pub fn format_posts(posts: &[StoredPost]) -> Vec<FormattedPost> {
    posts
        .iter()
        .filter_map(|post| {
            let revision = post.post_history.first()?;
            let body = &revision.body;
            let stats = &revision.metadata.stats;
            let collect = &revision.metadata.collect;
            let shortcode = post.post_shortcode.clone().unwrap_or_default();

            Some(FormattedPost {
                body: FormattedBody {
                    post_shortcode: shortcode.clone(),
                    name: body.author_name.clone(),
                    time: body.timestamp.clone(),
                    likes: stats.like,
                    message: body.text.clone(),
                    profile_id: body.author_id.clone(),
                    username: body.author_nick_name.clone(),
                    reply: body.reply,
                    shortcode,
                    is_video: body.is_video,
                    comments: stats.comment,
                    url: body.post_url.clone().unwrap_or_default(),
                    profile_url: body.author_url.clone(),
                    video_view_count: stats.seen,
                    id: post.post_id.clone(),
                    is_sponsored: body.is_sponsored,
                    location_name: body.location_name.clone(),
                    media: body.media.clone(),
                    profile_image: body.author_image.clone(),
                    terms: post.terms.clone(),
                    ..Default::default()
                },
                metadata: FormattedMetadata {
                    theme: collect.theme.clone(),
                    terms: post.terms.clone(),
                    project: DEFAULT_PROJECT.to_string(),
                    api_version: collect
                        .api_version
                        .clone()
                        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                },
            })
        })
        .collect()
}
