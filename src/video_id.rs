use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{TranscriptError, TranscriptResult};

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("valid video id pattern"));

/// Pulls the 11-character video identifier out of a watch, short or embed URL.
pub fn extract_video_id(url: &str) -> TranscriptResult<String> {
    VIDEO_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| TranscriptError::InvalidUrl(url.to_string()))
}
