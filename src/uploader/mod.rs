//! Replay upload stack: HTTP transport plus a retrying wrapper

pub mod retry;
pub mod transport;

use serde::Serialize;

use crate::error::Result;

pub use retry::{RetryPolicy, RetryingUploader};
pub use transport::HttpUploader;

/// Outcome of an accepted upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    /// HTTP status the server answered with (one of 200, 201, 204)
    pub status: u16,
    /// Response body excerpt, empty if the body could not be read
    pub body: String,
}

/// One upload attempt against the remote endpoint
pub trait Uploader {
    fn upload(
        &self,
        filename: &str,
        replay: &[u8],
    ) -> impl std::future::Future<Output = Result<UploadReceipt>> + Send;
}
