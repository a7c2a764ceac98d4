//! Terminal UI: status lines, spinner and build summary.
//!
//! Everything is written to stderr so stdout stays free for machine-readable
//! output (`brisk check --schema`).
//!
//! ```no_run
//! use brisk_cli::ui;
//!
//! ui::init(false, false);
//!
//! let spinner = ui::Spinner::new("Building...");
//! spinner.finish("Built 3 entries");
//!
//! ui::success("Build successful");
//! ui::error("Failed to parse file");
//! ```

mod format;
mod messages;
mod spinner;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{debug, error, info, success, warning};
pub use spinner::Spinner;

static QUIET: AtomicBool = AtomicBool::new(false);
static COLORS: AtomicBool = AtomicBool::new(true);

/// Apply the global `--quiet` and `--no-color` flags.
///
/// Call once from `main`, after argument parsing.
pub fn init(quiet: bool, no_color: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    let colors = !no_color && should_use_color();
    COLORS.store(colors, Ordering::Relaxed);
    console::set_colors_enabled_stderr(colors);
}

/// Whether only errors should be printed.
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether status lines are colored.
pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Check if running in a CI environment.
///
/// Detects common CI environment variables from GitHub Actions, GitLab CI,
/// CircleCI, and Travis CI.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, otherwise colors only when stderr is
/// attended by a user.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_is_ci_with_ci_var() {
        std::env::set_var("CI", "true");
        assert!(is_ci());
        std::env::remove_var("CI");
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color_overrides_force() {
        std::env::set_var("NO_COLOR", "1");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(!should_use_color());
        std::env::remove_var("NO_COLOR");
        assert!(should_use_color());
        std::env::remove_var("FORCE_COLOR");
    }

    #[test]
    #[serial]
    fn test_init_flags() {
        init(true, true);
        assert!(is_quiet());
        assert!(!colors_enabled());

        init(false, true);
        assert!(!is_quiet());
    }
}
