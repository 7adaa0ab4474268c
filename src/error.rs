use thiserror::Error;

pub type TranscriptResult<T> = Result<T, TranscriptError>;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Could not extract video ID from URL: {0}")]
    InvalidUrl(String),

    #[error("Transcripts are disabled for this video")]
    TranscriptsDisabled,

    #[error("No transcript found for languages: {0:?}")]
    NoTranscriptFound(Vec<String>),

    #[error("Video is unavailable: {0}")]
    VideoUnavailable(String),

    #[error("Request was blocked by YouTube (too many requests or bot check)")]
    RequestBlocked,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
