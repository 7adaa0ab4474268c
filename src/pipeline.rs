use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::cleaner::clean_transcript_text;
use crate::config::RunConfig;
use crate::error::TranscriptError;
use crate::filename::build_safe_filename;
use crate::format::{OutputFormat, format_as_json, format_as_srt, format_as_txt};
use crate::provider::TranscriptProvider;
use crate::selector::{SelectionPolicy, select_transcript};
use crate::transcript::SelectedTranscript;
use crate::video_id::extract_video_id;

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Printed,
    Saved(Vec<PathBuf>),
    NoTranscript,
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NO_TRANSCRIPT: u8 = 2;

/// Process exit status for a finished run.
pub fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Printed) | Ok(Outcome::Saved(_)) => EXIT_SUCCESS,
        Ok(Outcome::NoTranscript) => EXIT_NO_TRANSCRIPT,
        Err(_) => EXIT_FAILURE,
    }
}

/// Rendered output of one run, before it is printed or saved.
#[derive(Debug)]
pub struct RenderedTranscript {
    pub original: String,
    pub cleaned: Option<String>,
    pub extension: &'static str,
}

pub async fn run<P: TranscriptProvider>(config: &RunConfig, provider: &P) -> Result<Outcome> {
    let video_id = extract_video_id(&config.url)?;

    info!("Fetching transcript for video: {video_id}");
    match &config.policy {
        SelectionPolicy::EnglishFirst => {
            info!("Track preference: English variants, then manual, then auto-generated")
        }
        SelectionPolicy::Preferred(languages) => {
            info!("Language fallback order: {languages:?}")
        }
    }

    let Some(selected) = fetch_transcript(config, provider, &video_id).await else {
        warn!("No transcript available.");
        return Ok(Outcome::NoTranscript);
    };
    info!(
        "Using {} track: {} ({})",
        selected.track.kind(),
        selected.track.language,
        selected.track.language_code
    );

    let rendered = render(config, &video_id, &selected)?;

    if config.save {
        let title = resolve_title(provider, &video_id).await;
        let paths = save(config, &title, &video_id, &rendered).await?;
        Ok(Outcome::Saved(paths))
    } else {
        let mut stdout = io::stdout().lock();
        print_rendered(&mut stdout, &rendered).context("Failed to write transcript to stdout")?;
        Ok(Outcome::Printed)
    }
}

/// Provider failures end here: they are reported and treated as "no transcript".
async fn fetch_transcript<P: TranscriptProvider>(
    config: &RunConfig,
    provider: &P,
    video_id: &str,
) -> Option<SelectedTranscript> {
    let tracks = match provider.list_tracks(video_id).await {
        Ok(tracks) => tracks,
        Err(e) => {
            report_provider_error(&e);
            return None;
        }
    };
    debug!("Provider listed {} track(s)", tracks.len());

    match select_transcript(provider, &tracks, &config.policy, config.captions).await {
        Ok(selected) => selected,
        Err(e) => {
            report_provider_error(&e);
            None
        }
    }
}

fn report_provider_error(error: &TranscriptError) {
    match error {
        TranscriptError::TranscriptsDisabled | TranscriptError::NoTranscriptFound(_) => {
            warn!("{error}")
        }
        other => warn!("Error fetching transcript: {other}"),
    }
}

pub fn render(
    config: &RunConfig,
    video_id: &str,
    selected: &SelectedTranscript,
) -> Result<RenderedTranscript> {
    let original = match config.format {
        OutputFormat::Txt => format_as_txt(&selected.segments, config.timestamps),
        OutputFormat::Srt => format_as_srt(&selected.segments),
        OutputFormat::Json => format_as_json(video_id, &selected.track, &selected.segments)?,
    };

    let cleaned = config
        .cleaning_enabled()
        .then(|| clean_transcript_text(&original))
        .filter(|text| !text.is_empty());

    Ok(RenderedTranscript {
        original,
        cleaned,
        extension: config.format.extension(),
    })
}

pub fn print_rendered(out: &mut impl Write, rendered: &RenderedTranscript) -> io::Result<()> {
    writeln!(out, "\n===== ORIGINAL TRANSCRIPT =====\n")?;
    writeln!(out, "{}", rendered.original)?;
    if let Some(cleaned) = &rendered.cleaned {
        writeln!(out, "\n===== CLEANED TRANSCRIPT =====\n")?;
        writeln!(out, "{cleaned}")?;
    }
    out.flush()
}

async fn resolve_title<P: TranscriptProvider>(provider: &P, video_id: &str) -> String {
    match provider.video_title(video_id).await {
        Ok(title) if !title.trim().is_empty() => title,
        Ok(_) => video_id.to_string(),
        Err(e) => {
            warn!("Could not fetch video title, using the video ID instead: {e}");
            video_id.to_string()
        }
    }
}

async fn save(
    config: &RunConfig,
    title: &str,
    video_id: &str,
    rendered: &RenderedTranscript,
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let mut saved = Vec::with_capacity(2);

    let original_path = config
        .output_dir
        .join(build_safe_filename(title, video_id, rendered.extension, false));
    write_file(&original_path, &rendered.original).await?;
    info!("Saved original to: {}", original_path.display());
    saved.push(original_path);

    if let Some(cleaned) = &rendered.cleaned {
        let cleaned_path = config
            .output_dir
            .join(build_safe_filename(title, video_id, "txt", true));
        write_file(&cleaned_path, cleaned).await?;
        info!("Saved cleaned version to: {}", cleaned_path.display());
        saved.push(cleaned_path);
    }

    Ok(saved)
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
