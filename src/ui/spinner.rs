//! Terminal spinner for bounded operations.

use std::time::Duration;

use indicatif::ProgressBar;

use super::SpinnerHandle;

/// Spinner shown while a bounded probe runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Start a spinner with the given message.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.bar.finish_with_message(msg.to_string());
    }

    fn finish_error(&mut self, msg: &str) {
        self.bar.abandon_with_message(msg.to_string());
    }
}
