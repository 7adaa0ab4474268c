use log::{debug, warn};

use crate::error::{TranscriptError, TranscriptResult};
use crate::provider::TranscriptProvider;
use crate::transcript::{SelectedTranscript, TrackDescriptor};

/// How a track is chosen among the ones a video offers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Any English variant, then manual tracks, then auto-generated ones.
    EnglishFirst,
    /// Exact language codes in the given order, manual before generated
    /// within each code.
    Preferred(Vec<String>),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CaptionFilter {
    #[default]
    Any,
    Manual,
    Generated,
}

impl CaptionFilter {
    fn allows(self, track: &TrackDescriptor) -> bool {
        match self {
            CaptionFilter::Any => true,
            CaptionFilter::Manual => !track.is_generated,
            CaptionFilter::Generated => track.is_generated,
        }
    }
}

/// Orders the tracks worth trying, best first. Each track appears at most once.
pub fn candidate_order<'a>(
    tracks: &'a [TrackDescriptor],
    policy: &SelectionPolicy,
    filter: CaptionFilter,
) -> TranscriptResult<Vec<&'a TrackDescriptor>> {
    let allowed: Vec<&TrackDescriptor> = tracks.iter().filter(|t| filter.allows(t)).collect();

    let ranked: Vec<&TrackDescriptor> = match policy {
        SelectionPolicy::EnglishFirst => {
            let english = allowed.iter().filter(|t| t.language_code.contains("en"));
            let manual = allowed.iter().filter(|t| !t.is_generated);
            let generated = allowed.iter().filter(|t| t.is_generated);
            english.chain(manual).chain(generated).copied().collect()
        }
        SelectionPolicy::Preferred(codes) => {
            let ranked: Vec<&TrackDescriptor> = codes
                .iter()
                .flat_map(|code| {
                    let manual = allowed
                        .iter()
                        .filter(move |t| t.language_code == *code && !t.is_generated);
                    let generated = allowed
                        .iter()
                        .filter(move |t| t.language_code == *code && t.is_generated);
                    manual.chain(generated).copied()
                })
                .collect();
            if ranked.is_empty() && !allowed.is_empty() {
                return Err(TranscriptError::NoTranscriptFound(codes.clone()));
            }
            ranked
        }
    };

    let mut seen: Vec<&TrackDescriptor> = Vec::with_capacity(ranked.len());
    for track in ranked {
        if !seen.iter().any(|s| std::ptr::eq(*s, track)) {
            seen.push(track);
        }
    }
    Ok(seen)
}

/// Fetches candidates in order and returns the first one that yields text.
/// `Ok(None)` means nothing could be fetched.
pub async fn select_transcript<P: TranscriptProvider>(
    provider: &P,
    tracks: &[TrackDescriptor],
    policy: &SelectionPolicy,
    filter: CaptionFilter,
) -> TranscriptResult<Option<SelectedTranscript>> {
    let candidates = candidate_order(tracks, policy, filter)?;
    debug!("{} candidate track(s) out of {}", candidates.len(), tracks.len());

    for track in candidates {
        match provider.fetch_segments(track).await {
            Ok(segments) if !segments.is_empty() => {
                debug!(
                    "Selected {} track '{}' ({} segments)",
                    track.kind(),
                    track.language_code,
                    segments.len()
                );
                return Ok(Some(SelectedTranscript {
                    track: track.clone(),
                    segments,
                }));
            }
            Ok(_) => warn!("Track '{}' has no text, trying next", track.language_code),
            Err(e) => warn!("Failed to fetch track '{}': {e}", track.language_code),
        }
    }

    Ok(None)
}
