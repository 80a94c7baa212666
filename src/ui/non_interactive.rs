//! UI for CI and headless environments.
//!
//! Prompts cannot be shown, so every confirmation resolves to its default.
//! For the system-install gate the default is No, which preserves the
//! "anything but an explicit yes aborts" contract without blocking.

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Plain-output UI with no prompts.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        println!("[ok] {msg}");
    }

    fn warning(&mut self, msg: &str) {
        println!("[warn] {msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("[error] {msg}");
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let applied = if default { "yes" } else { "no" };
        println!("{question} [non-interactive: {applied}]");
        Ok(default)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("{message}");
        }
        Box::new(PlainSpinner)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that only prints terminal states.
struct PlainSpinner;

impl SpinnerHandle for PlainSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("[ok] {msg}");
    }

    fn finish_error(&mut self, msg: &str) {
        println!("[warn] {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_resolves_to_default() {
        let mut ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.confirm("Install system-wide?", false).unwrap());
        assert!(ui.confirm("Proceed?", true).unwrap());
    }

    #[test]
    fn reports_non_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert!(!ui.is_interactive());
    }
}
