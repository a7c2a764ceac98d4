//! Logging setup.
//!
//! `--verbose` turns on debug events for the brisk crates, `--quiet` keeps only
//! errors, otherwise `RUST_LOG` is honoured with an info-level fallback.
//!
//! ```rust,no_run
//! use brisk_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! debug!(entry = "src/index.ts", "resolved");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "brisk_cli=debug,brisk_bundler=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "brisk_cli=info,brisk_bundler=info";

/// Install the global tracing subscriber.
///
/// Must be called once, before any event is emitted. Later calls are ignored.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = filter_for(true, true).to_string();
        assert!(filter.contains("brisk_bundler=debug"));
    }

    #[test]
    fn quiet_keeps_errors_only() {
        assert_eq!(filter_for(false, true).to_string(), "error");
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
