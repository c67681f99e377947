pub mod error;
pub mod types;

pub use error::{InstagramError, Result};
pub use types::{Profile, TimelinePost};

use std::time::Duration;

use async_stream::try_stream;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;

use types::{GraphqlResponse, TimelineMedia, WebProfileResponse};

const BASE_URL: &str = "https://www.instagram.com";

/// Query hash for the owner-to-timeline-media GraphQL query used by the
/// web profile page.
const TIMELINE_QUERY_HASH: &str = "69cba40317214236af40e7efa697781d";

/// App id the web frontend sends; `web_profile_info` rejects requests
/// without it.
const IG_APP_ID: &str = "936619743392459";

/// Posts requested per timeline page, matching the web frontend.
const POSTS_PER_PAGE: u32 = 12;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub struct InstagramClient {
    client: reqwest::Client,
    session_id: Option<String>,
}

impl InstagramClient {
    pub fn new(session_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
            session_id,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut req = self
            .client
            .get(url)
            .query(query)
            .header("x-ig-app-id", IG_APP_ID);
        if let Some(sid) = &self.session_id {
            req = req.header(reqwest::header::COOKIE, format!("sessionid={sid}"));
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("").to_string();
            let message = resp.text().await.unwrap_or_default();
            return Err(InstagramError::Api {
                status: status.as_u16(),
                reason,
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Resolve a profile handle from a username. The response carries the
    /// first timeline page, which the post stream yields before paging.
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile> {
        tracing::debug!(username, "Fetching profile");

        let url = format!("{BASE_URL}/api/v1/users/web_profile_info/");
        let resp: WebProfileResponse = self.get_json(&url, &[("username", username)]).await?;

        let user = resp
            .data
            .user
            .ok_or_else(|| InstagramError::ProfileNotFound(username.to_string()))?;

        tracing::debug!(
            username,
            user_id = user.id.as_str(),
            first_page = user.edge_owner_to_timeline_media.edges.len(),
            "Profile resolved"
        );

        Ok(Profile {
            user_id: user.id,
            username: user.username.unwrap_or_else(|| username.to_string()),
            first_page: user.edge_owner_to_timeline_media,
        })
    }

    /// Fetch one timeline page after `cursor`.
    async fn fetch_timeline_page(&self, user_id: &str, cursor: &str) -> Result<TimelineMedia> {
        let variables = serde_json::json!({
            "id": user_id,
            "first": POSTS_PER_PAGE,
            "after": cursor,
        })
        .to_string();

        let url = format!("{BASE_URL}/graphql/query/");
        let resp: GraphqlResponse = self
            .get_json(
                &url,
                &[
                    ("query_hash", TIMELINE_QUERY_HASH),
                    ("variables", variables.as_str()),
                ],
            )
            .await?;

        let user = resp
            .data
            .user
            .ok_or_else(|| InstagramError::ProfileNotFound(user_id.to_string()))?;
        Ok(user.edge_owner_to_timeline_media)
    }

    /// Lazy, newest-first stream of a profile's posts. The first page comes
    /// from the profile response itself; further pages are fetched on demand
    /// as the consumer pulls past a page boundary, so each `next` may block
    /// on a network request. Unbounded — consumers cap how far they read.
    pub fn post_stream(&self, profile: Profile) -> BoxStream<'static, Result<TimelinePost>> {
        let client = Self {
            client: self.client.clone(),
            session_id: self.session_id.clone(),
        };

        let Profile {
            user_id,
            first_page,
            ..
        } = profile;

        Box::pin(try_stream! {
            let mut page = first_page;
            loop {
                for edge in page.edges {
                    yield TimelinePost::from(edge.node);
                }

                if !page.page_info.has_next_page {
                    break;
                }
                let cursor = match page.page_info.end_cursor {
                    Some(c) => c,
                    None => break,
                };

                tracing::debug!(user_id = user_id.as_str(), "Fetching next timeline page");
                page = client.fetch_timeline_page(&user_id, &cursor).await?;
            }
        })
    }
}
