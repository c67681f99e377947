pub mod error;
pub mod format;
pub mod types;

pub use error::{Result, StoreError};
pub use format::{format_posts, FormattedPost};
pub use types::{apply_resolution, to_records, PendingBatch, StoredPost};

use std::time::Duration;

use reqwest::StatusCode;

/// Route serving the next batch of records awaiting link resolution.
const PENDING_BATCH_ROUTE: &str = "instagram/coleta_links/get";

/// Route accepting resolved, formatted posts.
const SUBMIT_ROUTE: &str = "instagram/post/json";

/// Route deleting a processed record from the staging store.
const DELETE_ROUTE: &str = "instagram/coleta_links/delete";

/// Client for the internal staging store, authenticated with a bearer token.
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl StoreClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Fetch the next pending batch. `None` when the store has nothing
    /// queued (it answers 404, or an empty result list).
    pub async fn pending_batch(&self) -> Result<Option<PendingBatch>> {
        let url = format!("{}/{}", self.base_url, PENDING_BATCH_ROUTE);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let batch: PendingBatch = resp.json().await?;
        if batch.result.is_empty() {
            return Ok(None);
        }

        tracing::info!(
            username = batch.username.as_str(),
            total = batch.total,
            records = batch.result.len(),
            "Fetched pending batch"
        );
        Ok(Some(batch))
    }

    /// Submit resolved posts to the ingest endpoint.
    pub async fn send_posts(&self, posts: &[FormattedPost]) -> Result<()> {
        let url = format!("{}/{}", self.base_url, SUBMIT_ROUTE);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&posts)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // The store replies with a per-field acknowledgement map.
        let reply: serde_json::Value = resp.json().await.unwrap_or_default();
        if let Some(fields) = reply.get("resposta").and_then(|v| v.as_object()) {
            for (key, value) in fields {
                tracing::debug!(field = key.as_str(), %value, "Store acknowledgement");
            }
        }

        tracing::info!(count = posts.len(), "Submitted resolved posts");
        Ok(())
    }

    /// Delete a processed record from the staging store.
    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.base_url, DELETE_ROUTE);
        let resp = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .query(&[("post_id", post_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
