//! Cosmetic progress spinner shown while the journal is scanned.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// A spinner redrawn on stderr by a background ticker.
///
/// The ticker only redraws the line; it never sees the events being scanned.
/// Dropping or finishing the spinner stops the ticker and clears the line.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Starts the spinner, or a hidden one when disabled.
    ///
    /// Nothing is drawn when stderr is not a terminal.
    pub fn start(enabled: bool, message: &'static str) -> Self {
        let bar = if enabled {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// Stops the ticker and erases the spinner line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
