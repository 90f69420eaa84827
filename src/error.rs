//! Upload error taxonomy

use thiserror::Error;

/// Errors surfaced by the uploader stack
#[derive(Debug, Error)]
pub enum UploadError {
    /// max_tries is zero, so no attempt could be made. The original behavior
    /// of silently reporting success here was a caller trap.
    #[error("no upload attempts configured (max_tries = 0)")]
    NoAttemptsConfigured,

    /// Replay exceeds the buffered-replay size cap
    #[error("replay is {size} bytes, exceeds the {limit} byte limit")]
    ReplayTooLarge { size: usize, limit: usize },

    /// Server answered with a status outside {200, 201, 204}
    #[error("upload rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Request construction, connection, TLS, or timeout failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failure reading the replay from disk
    #[error("replay read failure: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// HTTP status carried by a protocol error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
