//! HTTP transport - one multipart POST per upload attempt

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, UploadError};

use super::{UploadReceipt, Uploader};

/// Form field carrying the replay bytes
const FILE_FIELD: &str = "Filedata";

/// Fixed tag identifying this upload client to the server
const UPLOAD_METHOD: &str = "linux_uploader";

/// Maximum response-body length kept in a receipt
const MAX_BODY_EXCERPT: usize = 1024;

/// Uploads one replay per call to the sc2replaystats endpoint
pub struct HttpUploader {
    config: Arc<Config>,
    client: Client,
}

impl HttpUploader {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, client })
    }

    fn build_form(&self, filename: &str, replay: &[u8]) -> Form {
        Form::new()
            .text("hashkey", self.config.hash_key.clone())
            .text("token", self.config.token.clone())
            .text("upload_method", UPLOAD_METHOD)
            .text("timestamp", Utc::now().timestamp().to_string())
            .part(
                FILE_FIELD,
                Part::bytes(replay.to_vec()).file_name(filename.to_string()),
            )
    }
}

impl Uploader for HttpUploader {
    async fn upload(&self, filename: &str, replay: &[u8]) -> Result<UploadReceipt> {
        let url = self.config.upload_url();
        let form = self.build_form(filename, replay);
        let start_time = Instant::now();

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        info!(
            "[POST {}] {} in {}ms",
            url,
            status,
            start_time.elapsed().as_millis()
        );

        // The status verdict stands even when the body cannot be read
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Error reading response body: {}", e);
                String::new()
            }
        };
        info!("Response: {}", body);

        let body = truncate_excerpt(&body, MAX_BODY_EXCERPT);

        match status.as_u16() {
            200 | 201 | 204 => Ok(UploadReceipt {
                status: status.as_u16(),
                body,
            }),
            code => Err(UploadError::Status { status: code, body }),
        }
    }
}

/// Truncate at a UTF-8 character boundary (safe for multi-byte chars)
fn truncate_excerpt(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &s[..end])
}
