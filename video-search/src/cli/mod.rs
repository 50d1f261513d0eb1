//! CLI module
//!
//! - `args`: CLI argument definitions (Cli struct)
//! - `session`: one-shot and interactive search sessions

mod args;
mod session;

pub use args::Cli;
pub use session::Session;
