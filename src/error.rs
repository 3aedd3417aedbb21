//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Every failure a generation run can hit collapses into one of these
//! variants; nothing is retried automatically.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GEMINI_API_KEY not found. Please make sure it is set in your environment variables.")]
    MissingApiKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini returned a non-success status or an unparseable body.
    #[error("Gemini API error: {0}")]
    Api(String),

    /// The first candidate finished with a non-STOP reason and no image.
    #[error("Image generation failed due to: {0}. Your prompt may have been blocked.")]
    ContentPolicy(String),

    #[error("No candidates returned from the API.")]
    NoCandidates,

    #[error("No image data found in the API response.")]
    NoImageData,

    /// Local precondition failed; no network call was made.
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
