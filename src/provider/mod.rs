pub mod youtube;

use crate::error::TranscriptResult;
use crate::transcript::{TrackDescriptor, TranscriptSegment};

/// Source of caption tracks for a video.
pub trait TranscriptProvider {
    /// Available tracks in provider order.
    async fn list_tracks(&self, video_id: &str) -> TranscriptResult<Vec<TrackDescriptor>>;

    async fn fetch_segments(&self, track: &TrackDescriptor)
    -> TranscriptResult<Vec<TranscriptSegment>>;

    /// Video title, already sanitized for use in a filename.
    async fn video_title(&self, video_id: &str) -> TranscriptResult<String>;
}

#[cfg(test)]
pub mod fixture {
    use std::collections::HashMap;

    use super::TranscriptProvider;
    use crate::error::{TranscriptError, TranscriptResult};
    use crate::transcript::{TrackDescriptor, TranscriptSegment};

    /// In-memory provider. Tracks without segments fail to fetch.
    #[derive(Default)]
    pub struct FixtureProvider {
        pub tracks: Vec<TrackDescriptor>,
        pub segments: HashMap<String, Vec<TranscriptSegment>>,
        pub title: Option<String>,
        pub disabled: bool,
    }

    pub fn track(code: &str, is_generated: bool) -> TrackDescriptor {
        TrackDescriptor {
            language: format!("Language {code}"),
            language_code: code.to_string(),
            is_generated,
            url: format!("fixture://{code}/{is_generated}"),
        }
    }

    impl FixtureProvider {
        pub fn with_track(mut self, track: TrackDescriptor, segments: Vec<TranscriptSegment>) -> Self {
            self.segments.insert(track.url.clone(), segments);
            self.tracks.push(track);
            self
        }

        pub fn with_broken_track(mut self, track: TrackDescriptor) -> Self {
            self.tracks.push(track);
            self
        }
    }

    impl TranscriptProvider for FixtureProvider {
        async fn list_tracks(&self, _video_id: &str) -> TranscriptResult<Vec<TrackDescriptor>> {
            if self.disabled {
                return Err(TranscriptError::TranscriptsDisabled);
            }
            Ok(self.tracks.clone())
        }

        async fn fetch_segments(
            &self,
            track: &TrackDescriptor,
        ) -> TranscriptResult<Vec<TranscriptSegment>> {
            self.segments
                .get(&track.url)
                .cloned()
                .ok_or_else(|| TranscriptError::MalformedResponse(format!("no fixture for {}", track.url)))
        }

        async fn video_title(&self, _video_id: &str) -> TranscriptResult<String> {
            self.title
                .clone()
                .ok_or_else(|| TranscriptError::MalformedResponse("no title".to_string()))
        }
    }
}
