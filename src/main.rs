mod cleaner;
mod cli;
mod config;
mod error;
mod filename;
mod format;
mod pipeline;
mod provider;
mod selector;
mod transcript;
mod video_id;

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};

use cli::Cli;
use config::ProviderConfig;
use pipeline::Outcome;
use provider::youtube::YouTubeProvider;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_target(false)
        .init();

    let provider_config = ProviderConfig::from_env();
    debug!("Provider configuration: {provider_config:?}");

    let provider = match YouTubeProvider::new(provider_config) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to initialize HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = cli.into_run_config();
    let result = pipeline::run(&config, &provider).await;
    match &result {
        Ok(Outcome::Saved(paths)) => debug!("Wrote {} file(s)", paths.len()),
        Err(e) => error!("{e:#}"),
        Ok(_) => {}
    }
    ExitCode::from(pipeline::exit_status(&result))
}
