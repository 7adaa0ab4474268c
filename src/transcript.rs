use serde::Serialize;

/// One timed unit of transcript text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// An available caption track for a video.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackDescriptor {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    /// Provider-specific handle used to fetch the track.
    pub url: String,
}

impl TrackDescriptor {
    pub fn kind(&self) -> &'static str {
        if self.is_generated {
            "auto-generated"
        } else {
            "manual"
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelectedTranscript {
    pub track: TrackDescriptor,
    pub segments: Vec<TranscriptSegment>,
}
