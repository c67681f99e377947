//! Polling loop: pull a pending batch from the staging store, resolve its
//! permalinks against the profile's recent posts, submit the resolved
//! batch, and delete the processed records. Rate-limit aborts and idle
//! streaks end the process with a distinguished exit code so the
//! supervisor restarts it after a cooldown.

use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use caplink_common::Config;
use caplink_resolver::LinkResolver;
use caplink_store_client::{apply_resolution, format_posts, to_records, StoreClient};
use instagram_client::InstagramClient;

/// Exit code meaning "rate-limit cooldown via restart" (EX_TEMPFAIL). The
/// supervisor restarts the process after a pause instead of flagging a crash.
const RATE_LIMIT_RESTART_CODE: i32 = 75;

/// Consecutive empty polls before restarting to shed any soft block.
const EMPTY_POLLS_BEFORE_RESTART: u32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("caplink=info".parse()?))
        .init();

    info!("Caplink collector starting...");

    let config = Config::from_env();
    config.log_redacted();

    let store = StoreClient::new(&config.api_base_url, &config.secret_token);
    let resolver = LinkResolver::new(InstagramClient::new(config.instagram_session_id.clone()));

    let scan_timeout = Duration::from_secs(config.scan_timeout_secs);
    let poll_interval = Duration::from_secs(config.poll_interval_secs);
    let mut empty_polls = 0u32;

    loop {
        let batch = match store.pending_batch().await {
            Ok(batch) => batch,
            Err(e) => {
                error!(error = %e, "Failed to poll the staging store");
                None
            }
        };

        let Some(mut batch) = batch else {
            empty_polls += 1;
            if empty_polls >= EMPTY_POLLS_BEFORE_RESTART {
                info!(
                    empty_polls,
                    "No pending posts for several polls, restarting for cooldown"
                );
                std::process::exit(RATE_LIMIT_RESTART_CODE);
            }
            info!(
                interval_secs = poll_interval.as_secs(),
                "No pending posts, waiting"
            );
            tokio::time::sleep(poll_interval).await;
            continue;
        };
        empty_polls = 0;

        info!(
            username = batch.username.as_str(),
            records = batch.result.len(),
            "Processing batch"
        );

        let mut records = to_records(&batch.result);
        let outcome = resolver
            .resolve(
                &mut records,
                &batch.username,
                config.max_retries,
                scan_timeout,
            )
            .await;

        if outcome.aborted() {
            warn!(
                ?outcome,
                "Batch could not be resolved, restarting for cooldown"
            );
            std::process::exit(RATE_LIMIT_RESTART_CODE);
        }

        apply_resolution(&mut batch.result, &records);
        let formatted = format_posts(&batch.result);

        match store.send_posts(&formatted).await {
            Ok(()) => {
                for post in &batch.result {
                    match store.delete_post(&post.post_id).await {
                        Ok(()) => {
                            info!(post_id = post.post_id.as_str(), "Deleted processed record")
                        }
                        Err(e) => error!(
                            post_id = post.post_id.as_str(),
                            error = %e,
                            "Failed to delete processed record"
                        ),
                    }
                }
                info!("Resolved batch submitted");
            }
            Err(e) => error!(error = %e, "Failed to submit resolved posts"),
        }
    }
}
