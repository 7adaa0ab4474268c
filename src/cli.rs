use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RunConfig;
use crate::format::OutputFormat;
use crate::selector::{CaptionFilter, SelectionPolicy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Any English variant, then manual tracks, then auto-generated tracks
    EnglishFirst,
    /// Exact language codes from --lang, in order
    Preferred,
}

#[derive(Parser, Debug)]
#[command(
    name = "yt-transcripter",
    about = "Extract and process YouTube video transcripts.",
    after_help = "EXAMPLES:\n    # Print the transcript\n    yt-transcripter \"URL\"\n\n    # Save as TXT\n    yt-transcripter \"URL\" --save\n\n    # Export SRT\n    yt-transcripter \"URL\" --format srt --save\n\n    # Strict language fallback\n    yt-transcripter \"URL\" --policy preferred --lang en,ms\n\n    # Save an extra cleaned copy\n    yt-transcripter \"URL\" --save --clean\n\nEXIT STATUS:\n    0  transcript printed or saved\n    1  invalid URL or failed to write output\n    2  no transcript available for the video"
)]
pub struct Cli {
    /// YouTube video URL
    pub url: String,

    /// Include timestamps (TXT only)
    #[arg(long)]
    pub timestamps: bool,

    /// Save transcript to file using safe filename (title + video id)
    #[arg(long)]
    pub save: bool,

    /// Comma-separated language codes (fallback order, used with --policy preferred)
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Txt)]
    pub format: OutputFormat,

    /// Clean transcript (remove fillers, noise, repeated words, merge lines)
    #[arg(long)]
    pub clean: bool,

    /// Track selection policy
    #[arg(long, value_enum, default_value_t = PolicyArg::EnglishFirst)]
    pub policy: PolicyArg,

    /// Restrict to manual or auto-generated captions
    #[arg(long, value_enum, default_value_t = CaptionFilter::Any)]
    pub captions: CaptionFilter,

    /// Directory for saved files
    #[arg(long, short = 'o', default_value = ".")]
    pub output: PathBuf,

    /// Show debug logging
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    pub fn languages(&self) -> Vec<String> {
        parse_languages(&self.lang)
    }

    pub fn into_run_config(self) -> RunConfig {
        let policy = match self.policy {
            PolicyArg::EnglishFirst => SelectionPolicy::EnglishFirst,
            PolicyArg::Preferred => SelectionPolicy::Preferred(self.languages()),
        };
        let mut config = RunConfig::new(self.url, self.format);
        config.timestamps = self.timestamps;
        config.clean = self.clean;
        config.save = self.save;
        config.output_dir = self.output;
        config.policy = policy;
        config.captions = self.captions;
        config
    }
}

pub fn parse_languages(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty())
        .collect()
}
