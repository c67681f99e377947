//! Test mocks for the resolution engine.
//!
//! `ScriptedSource` implements the `PostSource` seam: each call to
//! `recent_posts` plays back the next scripted attempt, and every post
//! actually pulled from a stream is counted so tests can assert scan caps.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_stream::stream;
use async_trait::async_trait;

use caplink_common::ScrapedPost;

use crate::source::{PostSource, PostStream};

/// One scripted `recent_posts` call.
pub enum ScriptedAttempt {
    /// The call itself fails with this message (profile fetch error).
    Fail(String),
    /// A stream yielding these posts, newest first.
    Posts(Vec<ScrapedPost>),
    /// Like `Posts`, but each pull sleeps first (slow network).
    SlowPosts(Vec<ScrapedPost>, Duration),
    /// Yields these posts, then an error item (failure mid-scan).
    PostsThenError(Vec<ScrapedPost>, String),
}

pub struct ScriptedSource {
    attempts: Mutex<VecDeque<ScriptedAttempt>>,
    pulled: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(attempts: Vec<ScriptedAttempt>) -> Self {
        Self {
            attempts: Mutex::new(attempts.into()),
            pulled: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of posts pulled across all attempts.
    pub fn pull_counter(&self) -> Arc<AtomicUsize> {
        self.pulled.clone()
    }

    /// Scripted attempts not yet consumed.
    pub fn remaining_attempts(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostSource for ScriptedSource {
    async fn recent_posts(&self, _profile_id: &str) -> Result<PostStream> {
        let attempt = self
            .attempts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("ScriptedSource: no scripted attempts left"))?;

        let pulled = self.pulled.clone();
        match attempt {
            ScriptedAttempt::Fail(message) => Err(anyhow!(message)),
            ScriptedAttempt::Posts(posts) => Ok(Box::pin(stream! {
                for post in posts {
                    pulled.fetch_add(1, Ordering::SeqCst);
                    yield Ok(post);
                }
            })),
            ScriptedAttempt::SlowPosts(posts, delay) => Ok(Box::pin(stream! {
                for post in posts {
                    tokio::time::sleep(delay).await;
                    pulled.fetch_add(1, Ordering::SeqCst);
                    yield Ok(post);
                }
            })),
            ScriptedAttempt::PostsThenError(posts, message) => Ok(Box::pin(stream! {
                for post in posts {
                    pulled.fetch_add(1, Ordering::SeqCst);
                    yield Ok(post);
                }
                yield Err(anyhow!(message));
            })),
        }
    }
}

/// Shorthand for a scraped post with a caption.
pub fn post(caption: &str, url: &str) -> ScrapedPost {
    ScrapedPost {
        caption: Some(caption.to_string()),
        url: url.to_string(),
    }
}

/// A scraped post with no caption at all.
pub fn captionless(url: &str) -> ScrapedPost {
    ScrapedPost {
        caption: None,
        url: url.to_string(),
    }
}
