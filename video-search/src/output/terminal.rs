//! Terminal output with colors and formatting
//!
//! Uses ANSI escape codes for colors and styling.

use std::io::{self, Write};

use super::{watch_label, OutputEvent, OutputWriter};
use crate::types::VideoResult;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const GRAY: &str = "\x1b[90m";

/// Terminal output writer with colors and formatting
pub struct TerminalOutput {
    /// Whether to use colors (can be disabled)
    use_colors: bool,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    /// Create a new terminal output writer
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create without colors
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format with color if colors are enabled
    fn color(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Format with multiple styles
    fn styled(&self, codes: &[&str], text: &str) -> String {
        if self.use_colors {
            let prefix: String = codes.iter().copied().collect();
            format!("{}{}{}", prefix, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Result card: title, description, thumbnail and link
    fn format_video(&self, position: usize, video: &VideoResult) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.color(GRAY, &format!("{:>2}.", position)),
            self.styled(&[BOLD], &video.title)
        )];

        if !video.description.is_empty() {
            lines.push(format!("    {}", video.description));
        }
        if !video.thumbnail_url.is_empty() {
            lines.push(format!(
                "    {}",
                self.color(GRAY, &format!("thumbnail: {}", video.thumbnail_url))
            ));
        }
        lines.push(format!(
            "    {} {}",
            self.styled(&[BOLD, RED], &format!("▶ {}", watch_label(&video.target_url))),
            self.styled(&[UNDERLINE, BLUE], &video.target_url)
        ));

        lines.join("\n")
    }
}

impl OutputWriter for TerminalOutput {
    fn write(&self, event: OutputEvent) {
        match event {
            OutputEvent::Video { position, video } => {
                println!("{}", self.format_video(position, &video));
            }

            OutputEvent::Progress { message, done } => {
                let marker = if done {
                    self.color(GREEN, "✓")
                } else {
                    self.color(BLUE, "⋯")
                };
                eprintln!("  {} {}", marker, self.color(GRAY, &message));
            }

            OutputEvent::Status(msg) => {
                eprintln!("{}", self.color(GRAY, &format!("  {}", msg)));
            }

            OutputEvent::Error(msg) => {
                eprintln!(
                    "{} {}",
                    self.styled(&[BOLD, RED], "Error:"),
                    self.color(RED, &msg)
                );
            }

            OutputEvent::System(msg) => {
                eprintln!("{}", self.color(GRAY, &msg));
            }

            OutputEvent::Prompt(prompt) => {
                eprint!("{}", self.styled(&[BOLD], &prompt));
            }

            OutputEvent::NewLine => {
                println!();
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }

    fn supports_colors(&self) -> bool {
        self.use_colors
    }
}
