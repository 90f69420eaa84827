//! Configuration module - upload credentials and retry settings

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Default upload endpoint host
pub const DEFAULT_BASE_URL: &str = "https://sc2replaystats.com";

/// Default per-attempt request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default interval between retries; the wait before attempt n+1 is n * interval
pub const DEFAULT_BACKOFF_INTERVAL: Duration = Duration::from_secs(15);

/// Default maximum number of upload attempts
pub const DEFAULT_MAX_TRIES: u32 = 3;

/// Optional configuration parameters for Config::new()
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub base_url: Option<String>,
    pub max_tries: Option<u32>,
    pub request_timeout: Option<Duration>,
    pub backoff_interval: Option<Duration>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub hash_key: String,
    pub token: String,
    pub max_tries: u32,
    pub request_timeout: Duration,
    pub backoff_interval: Duration,
}

impl Config {
    /// Create a new Config with required hash_key and token, plus optional settings
    pub fn new(hash_key: String, token: String, options: ConfigOptions) -> Result<Arc<Self>> {
        let base_url = options
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Prepend https:// when no scheme is given. http:// is kept as-is so
        // tests can point at a local mock server.
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("https://{}", base_url)
        };

        // Remove trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let hash_key = hash_key.trim().to_string();
        let token = token.trim().to_string();

        if hash_key.is_empty() {
            return Err(anyhow!("hash_key cannot be empty"));
        }

        if token.is_empty() {
            return Err(anyhow!("token cannot be empty"));
        }

        Ok(Arc::new(Self {
            base_url,
            hash_key,
            token,
            max_tries: options.max_tries.unwrap_or(DEFAULT_MAX_TRIES),
            request_timeout: options.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            backoff_interval: options.backoff_interval.unwrap_or(DEFAULT_BACKOFF_INTERVAL),
        }))
    }

    /// Full URL of the upload endpoint
    pub fn upload_url(&self) -> String {
        format!("{}/upload_replay.php", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts_with_url(url: &str) -> ConfigOptions {
        ConfigOptions {
            base_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_url_defaults_to_sc2replaystats() {
        let config = Config::new("hash".to_string(), "token".to_string(), Default::default())
            .expect("config should build");
        assert_eq!(config.base_url, "https://sc2replaystats.com");
        assert_eq!(
            config.upload_url(),
            "https://sc2replaystats.com/upload_replay.php"
        );
    }

    #[test]
    fn test_base_url_normalization() {
        let config = Config::new(
            "hash".to_string(),
            "token".to_string(),
            opts_with_url("example.com/"),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://example.com");

        // Plain http is preserved for local test servers
        let config = Config::new(
            "hash".to_string(),
            "token".to_string(),
            opts_with_url("http://127.0.0.1:8080"),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(Config::new("".to_string(), "token".to_string(), Default::default()).is_err());
        assert!(Config::new("hash".to_string(), "  ".to_string(), Default::default()).is_err());
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::new("hash".to_string(), "token".to_string(), Default::default()).unwrap();
        assert_eq!(config.max_tries, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.backoff_interval, Duration::from_secs(15));
    }
}
