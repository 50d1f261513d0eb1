//! Plain text output for pipes and CI environments
//!
//! No colors or special formatting - one tab-separated line per result so the
//! output stays easy to process with other tools. Only result rows go to
//! stdout; prompts and status lines go to stderr.

use std::io::{self, Write};

use super::{OutputEvent, OutputWriter};
use crate::types::VideoResult;

/// Plain text output writer (no colors)
#[derive(Default)]
pub struct PlainOutput;

impl PlainOutput {
    /// Create a new plain output writer
    pub fn new() -> Self {
        Self
    }

    /// `position<TAB>title<TAB>target<TAB>thumbnail<TAB>description`
    fn format_video(&self, position: usize, video: &VideoResult) -> String {
        [
            position.to_string(),
            video.title.clone(),
            video.target_url.clone(),
            video.thumbnail_url.clone(),
            video.description.replace(['\t', '\n'], " "),
        ]
        .join("\t")
    }
}

impl OutputWriter for PlainOutput {
    fn write(&self, event: OutputEvent) {
        match event {
            OutputEvent::Video { position, video } => {
                println!("{}", self.format_video(position, &video));
            }

            OutputEvent::Progress { message, done } => {
                let status = if done { "DONE" } else { "..." };
                eprintln!("  {} {}", status, message);
            }

            OutputEvent::Status(msg) => {
                eprintln!("  {}", msg);
            }

            OutputEvent::Error(msg) => {
                eprintln!("Error: {}", msg);
            }

            OutputEvent::System(msg) => {
                eprintln!("{}", msg);
            }

            OutputEvent::Prompt(prompt) => {
                eprint!("{}", prompt);
            }

            OutputEvent::NewLine => {}
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}
