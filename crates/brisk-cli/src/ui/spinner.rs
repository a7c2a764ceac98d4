//! Spinner for the build phase.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

use super::{colors_enabled, is_ci, is_quiet};

/// Spinner shown while a build runs.
///
/// Hidden with `--quiet`, in CI and when stderr is not a terminal.
///
/// ```no_run
/// use brisk_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Building...");
/// spinner.finish("Built!");
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner.
    pub fn new(message: &str) -> Self {
        let pb = if is_quiet() || is_ci() || !console::user_attended_stderr() {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Stop the spinner and leave a success line.
    pub fn finish(&self, message: &str) {
        if colors_enabled() {
            self.pb
                .finish_with_message(format!("{} {}", "✓".green(), message));
        } else {
            self.pb.finish_with_message(format!("✓ {}", message));
        }
    }

    /// Stop the spinner and leave a failure line.
    pub fn fail(&self, message: &str) {
        if colors_enabled() {
            self.pb
                .finish_with_message(format!("{} {}", "✗".red(), message));
        } else {
            self.pb.finish_with_message(format!("✗ {}", message));
        }
    }
}
