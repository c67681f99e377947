//! The post-source seam. The engine only ever sees this trait, so tests run
//! against scripted sources: no network, no session cookies.

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use caplink_common::ScrapedPost;
use instagram_client::InstagramClient;

pub type PostStream = BoxStream<'static, Result<ScrapedPost>>;

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Newest-first stream of a profile's recent posts. Resolving the
    /// profile handle happens in this call; each later pull may itself
    /// block on a network fetch. The stream is unbounded — consumers cap
    /// how far they read.
    async fn recent_posts(&self, profile_id: &str) -> Result<PostStream>;
}

#[async_trait]
impl<T: PostSource + ?Sized> PostSource for std::sync::Arc<T> {
    async fn recent_posts(&self, profile_id: &str) -> Result<PostStream> {
        (**self).recent_posts(profile_id).await
    }
}

#[async_trait]
impl PostSource for InstagramClient {
    async fn recent_posts(&self, profile_id: &str) -> Result<PostStream> {
        let profile = self.fetch_profile(profile_id).await?;
        let stream = self
            .post_stream(profile)
            .map(|item| -> Result<ScrapedPost> {
                let post = item?;
                Ok(ScrapedPost {
                    url: post.url(),
                    caption: post.caption,
                })
            })
            .boxed();
        Ok(stream)
    }
}
