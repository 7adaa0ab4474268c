use std::path::PathBuf;

use dotenvy::dotenv;

use crate::format::OutputFormat;
use crate::selector::{CaptionFilter, SelectionPolicy};

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";
const DEFAULT_CLIENT_VERSION: &str = "20.10.38";

/// Everything one invocation needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub format: OutputFormat,
    pub timestamps: bool,
    pub clean: bool,
    pub save: bool,
    pub output_dir: PathBuf,
    pub policy: SelectionPolicy,
    pub captions: CaptionFilter,
}

impl RunConfig {
    pub fn new(url: String, format: OutputFormat) -> Self {
        Self {
            url,
            format,
            timestamps: false,
            clean: false,
            save: false,
            output_dir: PathBuf::from("."),
            policy: SelectionPolicy::EnglishFirst,
            captions: CaptionFilter::Any,
        }
    }

    /// Cleaning only applies to plain-text output.
    pub fn cleaning_enabled(&self) -> bool {
        self.clean && self.format == OutputFormat::Txt
    }
}

/// Endpoint and client settings for the YouTube provider, overridable from
/// the environment or a `.env` file.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub client_version: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();
        Self {
            base_url: env_or("YT_TRANSCRIPT_BASE_URL", defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            user_agent: env_or("YT_TRANSCRIPT_USER_AGENT", defaults.user_agent),
            accept_language: env_or("YT_TRANSCRIPT_ACCEPT_LANGUAGE", defaults.accept_language),
            client_version: env_or("YT_TRANSCRIPT_CLIENT_VERSION", defaults.client_version),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}
