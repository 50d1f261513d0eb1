//! Output abstraction for the CLI
//!
//! This module provides a trait-based output system that decouples state
//! changes from display logic. [`render_state`] turns a [`SearchState`] into
//! output events; an [`OutputWriter`] decides how those events look.

use url::Url;

use crate::state::SearchState;
use crate::types::VideoResult;

mod plain;
mod terminal;

pub use plain::PlainOutput;
pub use terminal::TerminalOutput;

// ============================================================================
// Output Events
// ============================================================================

/// Events that can be displayed to the user
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// One search result card
    Video {
        /// 1-based position in the result list
        position: usize,
        video: VideoResult,
    },

    /// Progress indicator
    Progress { message: String, done: bool },

    /// Status message (informational)
    Status(String),

    /// Error message
    Error(String),

    /// System message (dimmed, for internal info)
    System(String),

    /// Input prompt, written to stderr without a newline
    Prompt(String),

    /// New line / separator
    NewLine,
}

// ============================================================================
// Output Writer Trait
// ============================================================================

/// Trait for writing output events
pub trait OutputWriter: Send + Sync {
    /// Write an output event
    fn write(&self, event: OutputEvent);

    /// Flush any buffered output
    fn flush(&self);

    /// Whether this writer supports colors/formatting
    fn supports_colors(&self) -> bool {
        false
    }
}

// ============================================================================
// State Rendering
// ============================================================================

/// Output events describing `state`
pub fn render_state(state: &SearchState) -> Vec<OutputEvent> {
    match state {
        SearchState::Idle => Vec::new(),

        SearchState::Loading { .. } => vec![OutputEvent::Progress {
            message: "Searching...".to_string(),
            done: false,
        }],

        SearchState::Success { results, .. } if results.is_empty() => {
            vec![OutputEvent::Status("No results".to_string())]
        }

        SearchState::Success { results, .. } => {
            let noun = if results.len() == 1 { "result" } else { "results" };
            let mut events = vec![OutputEvent::Progress {
                message: format!("{} {}", results.len(), noun),
                done: true,
            }];
            events.extend(results.iter().enumerate().map(|(i, video)| OutputEvent::Video {
                position: i + 1,
                video: video.clone(),
            }));
            events.push(OutputEvent::NewLine);
            events
        }

        SearchState::Error { failure, .. } => vec![OutputEvent::Error(format!(
            "{} ({})",
            failure.kind.user_message(),
            failure.reason
        ))],
    }
}

/// Write every event for `state` and flush
pub fn write_state(output: &dyn OutputWriter, state: &SearchState) {
    for event in render_state(state) {
        output.write(event);
    }
    output.flush();
}

/// Link label for a result ("Watch on YouTube" for YouTube links)
pub fn watch_label(target_url: &str) -> &'static str {
    let is_youtube = Url::parse(target_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| {
            host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com")
        });

    if is_youtube {
        "Watch on YouTube"
    } else {
        "Watch"
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a default output writer based on environment
pub fn default_output() -> Box<dyn OutputWriter> {
    use std::io::IsTerminal;

    if std::io::stdout().is_terminal() {
        Box::new(TerminalOutput::new())
    } else {
        Box::new(PlainOutput::new())
    }
}

// ============================================================================
// Tests
// ============================================================================
