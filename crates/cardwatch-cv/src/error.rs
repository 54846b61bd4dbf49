//! Error types for cardwatch-cv

use thiserror::Error;

/// Errors raised while acquiring or analysing frames and running a session
#[derive(Error, Debug)]
pub enum Error {
    /// The frame source could not deliver a frame. Fatal for a session.
    #[error("Frame acquisition failed: {0}")]
    Acquisition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image analysis failed: {0}")]
    Analysis(String),

    #[error("Session cannot {action} while {state}")]
    InvalidState { action: &'static str, state: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cardwatch-cv operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "opencv")]
impl From<opencv::Error> for Error {
    fn from(err: opencv::Error) -> Self {
        Error::Analysis(err.to_string())
    }
}
