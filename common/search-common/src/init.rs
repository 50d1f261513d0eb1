//! Logging initialization
//!
//! Provides standardized tracing setup shared by every binary in the workspace.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
///
/// Sets up logging to stderr (stdout is reserved for rendered results) with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG
/// - `level` as the default for the specified crate
///
/// Set `LOG_FORMAT=json` for structured JSON output (useful for log aggregation).
/// Default is human-readable text output.
///
/// # Arguments
///
/// * `crate_name` - The crate whose events should be shown (e.g., "video_search")
/// * `level` - Default level for that crate (e.g., "info")
pub fn init_tracing(crate_name: &str, level: &str) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Map a `-v` count to a log level (0 = warn, 1 = info, 2 = debug, 3+ = trace)
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: init_tracing itself is not tested here as a subscriber
    // can only be installed once per process

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(3), "trace");
        assert_eq!(level_for_verbosity(200), "trace");
    }

    #[test]
    fn test_directive_parses() {
        let directive = format!("{}={}", "video_search", level_for_verbosity(2));
        let parsed: Result<tracing_subscriber::filter::Directive, _> = directive.parse();
        assert!(parsed.is_ok());
    }
}
