use serde::Deserialize;

/// A single post from a profile's timeline, flattened from the GraphQL
/// edge/node shape.
#[derive(Debug, Clone)]
pub struct TimelinePost {
    pub shortcode: String,
    pub caption: Option<String>,
}

impl TimelinePost {
    /// Permanent post URL derived from the shortcode.
    pub fn url(&self) -> String {
        format!("https://www.instagram.com/p/{}/", self.shortcode)
    }
}

impl From<TimelineNode> for TimelinePost {
    fn from(node: TimelineNode) -> Self {
        let caption = node
            .edge_media_to_caption
            .edges
            .into_iter()
            .next()
            .map(|e| e.node.text);
        Self {
            shortcode: node.shortcode,
            caption,
        }
    }
}

/// A resolved profile handle plus the first timeline page that rides along
/// in the `web_profile_info` response.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub(crate) first_page: TimelineMedia,
}

// --- web_profile_info response ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WebProfileResponse {
    pub data: WebProfileData,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WebProfileData {
    pub user: Option<ProfileUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    pub edge_owner_to_timeline_media: TimelineMedia,
}

// --- shared timeline shapes ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TimelineMedia {
    #[serde(default)]
    pub edges: Vec<TimelineEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TimelineEdge {
    pub node: TimelineNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineNode {
    pub shortcode: String,
    #[serde(default)]
    pub edge_media_to_caption: CaptionEdges,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptionEdges {
    #[serde(default)]
    pub edges: Vec<CaptionEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionEdge {
    pub node: CaptionText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

// --- paged graphql/query response ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphqlResponse {
    pub data: GraphqlData,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphqlData {
    pub user: Option<GraphqlUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphqlUser {
    pub edge_owner_to_timeline_media: TimelineMedia,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_node_flattens_first_caption_edge() {
        let node: TimelineNode = serde_json::from_value(serde_json::json!({
            "shortcode": "abc123",
            "edge_media_to_caption": {
                "edges": [{ "node": { "text": "Hello World" } }]
            }
        }))
        .unwrap();
        let post = TimelinePost::from(node);
        assert_eq!(post.shortcode, "abc123");
        assert_eq!(post.caption.as_deref(), Some("Hello World"));
        assert_eq!(post.url(), "https://www.instagram.com/p/abc123/");
    }

    #[test]
    fn timeline_node_without_caption_edges() {
        let node: TimelineNode = serde_json::from_value(serde_json::json!({
            "shortcode": "xyz",
            "edge_media_to_caption": { "edges": [] }
        }))
        .unwrap();
        let post = TimelinePost::from(node);
        assert_eq!(post.caption, None);
    }

    #[test]
    fn web_profile_response_deserializes() {
        let resp: WebProfileResponse = serde_json::from_value(serde_json::json!({
            "data": {
                "user": {
                    "id": "12345",
                    "username": "someone",
                    "edge_owner_to_timeline_media": {
                        "edges": [],
                        "page_info": { "has_next_page": false, "end_cursor": null }
                    }
                }
            }
        }))
        .unwrap();
        let user = resp.data.user.unwrap();
        assert_eq!(user.id, "12345");
        assert!(!user.edge_owner_to_timeline_media.page_info.has_next_page);
    }

    #[test]
    fn missing_user_is_none() {
        let resp: WebProfileResponse =
            serde_json::from_value(serde_json::json!({ "data": { "user": null } })).unwrap();
        assert!(resp.data.user.is_none());
    }
}
