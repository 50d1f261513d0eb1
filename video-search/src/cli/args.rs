//! CLI argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::SourceKind;

#[derive(Parser, Debug)]
#[command(name = "video-search")]
#[command(about = "Search for videos on a topic")]
pub struct Cli {
    /// Topic to search for (starts interactive mode if not provided)
    pub query: Option<String>,

    /// Result source: "fixed" (sample videos) or "searxng" [env: VIDEO_SEARCH_SOURCE]
    #[arg(long)]
    pub source: Option<SourceKind>,

    /// Config file [env: VIDEO_SEARCH_CONFIG_PATH, default: ~/.video-search/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SearXNG instance URL [env: SEARXNG_URL]
    #[arg(long)]
    pub searxng_url: Option<String>,

    /// Per-search timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Plain tab-separated output, no colors
    #[arg(long)]
    pub plain: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
