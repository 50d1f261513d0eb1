//! Video Search CLI
//!
//! Type a topic, get videos back.
//!
//! # Configuration
//! Set `VIDEO_SEARCH_SOURCE` / `SEARXNG_URL` env vars or configure in
//! `~/.video-search/config.toml`

use std::io::IsTerminal;

use clap::Parser;
use tokio::io::BufReader;

use video_search::cli::{Cli, Session};
use video_search::output::{default_output, OutputWriter, PlainOutput};
use video_search::{build_source, Config, SearchController, SearchState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    search_common::init_tracing("video_search", search_common::level_for_verbosity(cli.verbose))?;

    // File and env first, then CLI flags on top
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.source, cli.searxng_url.clone());
    if let Some(seconds) = cli.timeout {
        config.search.timeout_seconds = Some(seconds);
    }

    let source = build_source(&config)?;
    let output: Box<dyn OutputWriter> = if cli.plain {
        Box::new(PlainOutput::new())
    } else {
        default_output()
    };

    let mut session = Session::new(SearchController::new(source), output)
        .with_prompt(std::io::stdin().is_terminal());

    match cli.query {
        Some(query) => {
            if let SearchState::Error { failure, .. } = session.run_once(&query).await {
                anyhow::bail!("search failed: {}", failure.reason);
            }
        }
        None => {
            session
                .run_interactive(BufReader::new(tokio::io::stdin()))
                .await?;
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
