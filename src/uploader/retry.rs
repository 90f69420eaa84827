//! Retrying wrapper - bounded attempts with linear backoff

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, UploadError};

use super::{HttpUploader, UploadReceipt, Uploader};

/// Replays are buffered whole so every attempt resends identical bytes;
/// anything above this cap is rejected up front. Real replays are well
/// under 1 MiB.
pub const MAX_REPLAY_SIZE: usize = 32 * 1024 * 1024;

/// Linear backoff schedule: the wait after failed attempt n is n * backoff,
/// so the first retry follows immediately
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_tries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_tries: u32, backoff: Duration) -> Self {
        Self { max_tries, backoff }
    }

    /// Sleep duration after failed attempt `attempt` (0-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// Wraps an [`Uploader`], re-driving it until success or attempts run out
pub struct RetryingUploader<U: Uploader> {
    inner: U,
    policy: RetryPolicy,
}

impl<U: Uploader> RetryingUploader<U> {
    pub fn new(inner: U, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Upload buffered replay bytes, retrying failed attempts.
    ///
    /// Returns the receipt of the first successful attempt, or the error of
    /// the last failed one. `max_tries = 0` is an error, not a silent success.
    pub async fn upload(&self, filename: &str, replay: &[u8]) -> Result<UploadReceipt> {
        if self.policy.max_tries == 0 {
            return Err(UploadError::NoAttemptsConfigured);
        }

        if replay.len() > MAX_REPLAY_SIZE {
            return Err(UploadError::ReplayTooLarge {
                size: replay.len(),
                limit: MAX_REPLAY_SIZE,
            });
        }

        let mut last_error = None;

        for attempt in 0..self.policy.max_tries {
            match self.inner.upload(filename, replay).await {
                Ok(receipt) => return Ok(receipt),
                Err(e) => {
                    warn!("[{}] Upload of replay='{}' failed: {}", attempt, filename, e);

                    if attempt + 1 < self.policy.max_tries {
                        let sleep_time = self.policy.backoff_for(attempt);
                        info!("[{}] Retrying in {}s", attempt, sleep_time.as_secs_f64());
                        tokio::time::sleep(sleep_time).await;
                    }

                    last_error = Some(e);
                }
            }
        }

        // max_tries > 0, so at least one attempt ran and failed
        Err(last_error.unwrap_or(UploadError::NoAttemptsConfigured))
    }

    /// Read a replay file from disk and upload it, naming the multipart file
    /// part after the path's final component
    pub async fn upload_file(&self, path: &Path) -> Result<UploadReceipt> {
        let replay = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        self.upload(&filename, &replay).await
    }
}

impl RetryingUploader<HttpUploader> {
    /// The standard stack: HTTP transport wrapped in the configured retry policy
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let policy = RetryPolicy::new(config.max_tries, config.backoff_interval);
        let inner = HttpUploader::new(config)?;
        Ok(Self::new(inner, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy::new(4, Duration::from_secs(15));
        assert_eq!(policy.backoff_for(0), Duration::ZERO);
        assert_eq!(policy.backoff_for(1), Duration::from_secs(15));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(30));
    }
}
