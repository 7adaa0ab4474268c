use anyhow::Result;
use serde::Serialize;

use crate::transcript::{TrackDescriptor, TranscriptSegment};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Txt,
    Srt,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Srt => "srt",
            OutputFormat::Json => "json",
        }
    }
}

/// `HH:MM:SS`, whole seconds truncated.
pub fn format_timestamp_txt(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// `HH:MM:SS,mmm` as used in SubRip cue timings.
pub fn format_timestamp_srt(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let secs = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        total_ms % 1000
    )
}

pub fn format_as_txt(segments: &[TranscriptSegment], keep_timestamps: bool) -> String {
    segments
        .iter()
        .map(|seg| {
            if keep_timestamps {
                format!("[{}] {}", format_timestamp_txt(seg.start), seg.text)
            } else {
                seg.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_as_srt(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                format_timestamp_srt(seg.start),
                format_timestamp_srt(seg.end()),
                seg.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct TranscriptDocument<'a> {
    video_id: &'a str,
    language: &'a str,
    language_code: &'a str,
    is_generated: bool,
    segments: &'a [TranscriptSegment],
}

pub fn format_as_json(
    video_id: &str,
    track: &TrackDescriptor,
    segments: &[TranscriptSegment],
) -> Result<String> {
    let document = TranscriptDocument {
        video_id,
        language: &track.language,
        language_code: &track.language_code,
        is_generated: track.is_generated,
        segments,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 2.0, "Hi"),
            TranscriptSegment::new(2.0, 3.0, "there"),
        ]
    }

    #[test]
    fn test_txt_without_timestamps() {
        assert_eq!(format_as_txt(&sample(), false), "Hi\nthere");
    }

    #[test]
    fn test_txt_with_timestamps() {
        assert_eq!(
            format_as_txt(&sample(), true),
            "[00:00:00] Hi\n[00:00:02] there"
        );
    }

    #[test]
    fn test_txt_timestamp_truncates_fraction() {
        assert_eq!(format_timestamp_txt(59.999), "00:00:59");
        assert_eq!(format_timestamp_txt(3725.4), "01:02:05");
    }

    #[test]
    fn test_srt_single_cue() {
        let segments = vec![TranscriptSegment::new(1.5, 2.25, "Hello")];
        assert_eq!(
            format_as_srt(&segments),
            "1\n00:00:01,500 --> 00:00:03,750\nHello\n"
        );
    }

    #[test]
    fn test_srt_cues_are_numbered_and_separated() {
        assert_eq!(
            format_as_srt(&sample()),
            "1\n00:00:00,000 --> 00:00:02,000\nHi\n\n2\n00:00:02,000 --> 00:00:05,000\nthere\n"
        );
    }

    #[test]
    fn test_srt_timestamp_rounds_to_nearest_millisecond() {
        assert_eq!(format_timestamp_srt(1.0006), "00:00:01,001");
        assert_eq!(format_timestamp_srt(1.0004), "00:00:01,000");
        assert_eq!(format_timestamp_srt(59.9996), "00:01:00,000");
    }

    #[test]
    fn test_srt_timestamp_hours() {
        assert_eq!(format_timestamp_srt(3661.042), "01:01:01,042");
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(format_as_txt(&[], true), "");
        assert_eq!(format_as_srt(&[]), "");
    }

    #[test]
    fn test_json_document() {
        let track = TrackDescriptor {
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: false,
            url: "unused".to_string(),
        };
        let json = format_as_json("dQw4w9WgXcQ", &track, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["video_id"], "dQw4w9WgXcQ");
        assert_eq!(value["language_code"], "en");
        assert_eq!(value["is_generated"], false);
        assert_eq!(value["segments"][1]["text"], "there");
        assert_eq!(value["segments"][1]["start"], 2.0);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Txt.extension(), "txt");
        assert_eq!(OutputFormat::Srt.extension(), "srt");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
