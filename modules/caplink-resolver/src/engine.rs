//! Link-resolution engine.
//!
//! Takes a batch of store records and a profile identifier, scans the
//! profile's recent posts, and resolves each record to the best-matching
//! permalink by caption similarity. Scans are bounded twice over: at most
//! [`SCAN_LIMIT`] posts examined, and at most the caller's wall-clock
//! budget. Failures are classified as rate limiting (retry the attempt) or
//! anything else (abort the call).

use std::time::{Duration, Instant};

use anyhow::Result;
use futures::StreamExt;
use tracing::{debug, error, info, warn};

use caplink_common::text::match_snippet;
use caplink_common::PostRecord;

use crate::classifier;
use crate::outcome::ResolveOutcome;
use crate::source::PostSource;

/// Most recent posts examined per attempt.
pub const SCAN_LIMIT: usize = 30;

/// Minimum similarity score for a match to be accepted (inclusive).
pub const ACCEPT_THRESHOLD: f64 = 0.50;

/// Error-text predicate deciding whether an attempt is worth retrying.
pub type RateLimitClassifier = fn(&str) -> bool;

/// Best scraped-post match found so far for one record. Rebuilt from
/// scratch on every attempt; nothing carries over.
#[derive(Debug, Clone, Default)]
struct MatchCandidate {
    best_url: Option<String>,
    best_score: f64,
}

/// Retry state machine for one resolution call.
#[derive(Debug)]
enum AttemptState {
    Attempting(u32),
    RateLimitedRetry(u32),
    Aborted,
    Succeeded { resolved: usize, partial: bool },
}

struct ScanResult {
    candidates: Vec<MatchCandidate>,
    timed_out: bool,
}

pub struct LinkResolver<S> {
    source: S,
    classify_rate_limit: RateLimitClassifier,
}

impl<S: PostSource> LinkResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_classifier(source, classifier::is_rate_limited)
    }

    /// Inject a different classifier (tests, platforms with other phrasing).
    pub fn with_classifier(source: S, classify_rate_limit: RateLimitClassifier) -> Self {
        Self {
            source,
            classify_rate_limit,
        }
    }

    /// Resolve permalinks for `records` against `profile_id`'s recent posts.
    ///
    /// Records are mutated in place, and only on the successful attempt;
    /// when the outcome reports aborted, the batch is untouched and must
    /// not be trusted. Rate-limited attempts are retried up to
    /// `max_retries` with no engine-imposed backoff; any other failure
    /// aborts immediately, discarding the whole batch.
    pub async fn resolve(
        &self,
        records: &mut [PostRecord],
        profile_id: &str,
        max_retries: u32,
        scan_timeout: Duration,
    ) -> ResolveOutcome {
        let mut state = AttemptState::Attempting(1);

        loop {
            state = match state {
                AttemptState::Attempting(attempt) => {
                    info!(
                        profile = profile_id,
                        attempt,
                        max_retries,
                        records = records.len(),
                        "Scanning profile for link candidates"
                    );
                    match self.scan_profile(records, profile_id, scan_timeout).await {
                        Ok(scan) => {
                            let resolved = apply_candidates(records, &scan.candidates);
                            info!(
                                profile = profile_id,
                                resolved,
                                total = records.len(),
                                "Link resolution finished"
                            );
                            AttemptState::Succeeded {
                                resolved,
                                partial: scan.timed_out,
                            }
                        }
                        Err(e) => {
                            let text = format!("{e:#}");
                            if (self.classify_rate_limit)(&text) {
                                warn!(
                                    profile = profile_id,
                                    attempt, "Rate limit hit while scanning profile"
                                );
                                AttemptState::RateLimitedRetry(attempt)
                            } else {
                                error!(profile = profile_id, error = %text, "Profile scan failed");
                                AttemptState::Aborted
                            }
                        }
                    }
                }
                AttemptState::RateLimitedRetry(attempt) if attempt < max_retries => {
                    AttemptState::Attempting(attempt + 1)
                }
                AttemptState::RateLimitedRetry(_) => {
                    warn!(
                        profile = profile_id,
                        max_retries, "Retries exhausted, giving up on batch"
                    );
                    return ResolveOutcome::RetriesExhausted;
                }
                AttemptState::Aborted => return ResolveOutcome::NonRetryableFailure,
                AttemptState::Succeeded { resolved, partial } => {
                    return ResolveOutcome::Success { resolved, partial };
                }
            };
        }
    }

    /// One attempt: resolve the profile handle, then score up to
    /// [`SCAN_LIMIT`] posts against every record within the time budget.
    /// The budget is checked between pulls, so a single slow fetch can
    /// overshoot until it returns; posts already examined are kept.
    async fn scan_profile(
        &self,
        records: &[PostRecord],
        profile_id: &str,
        scan_timeout: Duration,
    ) -> Result<ScanResult> {
        let mut stream = self.source.recent_posts(profile_id).await?;

        let snippets: Vec<String> = records.iter().map(|r| match_snippet(&r.text)).collect();
        let mut candidates = vec![MatchCandidate::default(); records.len()];

        let start = Instant::now();
        let mut examined = 0usize;
        let mut timed_out = false;

        while examined < SCAN_LIMIT {
            if start.elapsed() > scan_timeout {
                warn!(
                    profile = profile_id,
                    examined,
                    timeout_secs = scan_timeout.as_secs(),
                    "Scan time budget exceeded, keeping partial results"
                );
                timed_out = true;
                break;
            }

            let Some(post) = stream.next().await else {
                break;
            };
            let post = post?;
            examined += 1;

            let Some(caption) = post.caption.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let haystack = match_snippet(caption);

            for (candidate, snippet) in candidates.iter_mut().zip(&snippets) {
                let score = crate::similarity::ratio(&haystack, snippet);
                // Strictly greater, so the first-seen (newest) post wins ties.
                if score > candidate.best_score {
                    candidate.best_score = score;
                    candidate.best_url = Some(post.url.clone());
                }
            }
        }

        debug!(profile = profile_id, examined, timed_out, "Profile scan complete");
        Ok(ScanResult {
            candidates,
            timed_out,
        })
    }
}

/// Accept every candidate at or above [`ACCEPT_THRESHOLD`], writing the
/// permalink and derived shortcode into the record. Returns how many were
/// accepted.
fn apply_candidates(records: &mut [PostRecord], candidates: &[MatchCandidate]) -> usize {
    let mut found = 0;
    for (record, candidate) in records.iter_mut().zip(candidates) {
        match candidate.best_url.as_deref() {
            Some(url) if candidate.best_score >= ACCEPT_THRESHOLD => {
                record.accept(url);
                found += 1;
                info!(record = record.id.as_str(), "Link found");
                debug!(
                    record = record.id.as_str(),
                    score = candidate.best_score,
                    url,
                    "Best match accepted"
                );
            }
            _ => {
                info!(record = record.id.as_str(), "No link found");
                debug!(
                    record = record.id.as_str(),
                    score = candidate.best_score,
                    "Best match below threshold"
                );
            }
        }
    }
    found
}
