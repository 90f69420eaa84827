//! replay-uploader library - sc2replaystats replay uploads with retry

pub mod config;
pub mod error;
pub mod uploader;

// Re-export commonly used types
pub use config::{Config, ConfigOptions};
pub use error::{Result, UploadError};
pub use uploader::{HttpUploader, RetryPolicy, RetryingUploader, UploadReceipt, Uploader};
