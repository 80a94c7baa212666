//! Interactive terminal UI.

use console::{style, Term};
use dialoguer::Confirm;

use crate::error::{InstallError, Result};

use super::{OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

/// Convert dialoguer errors to InstallError.
fn map_dialoguer_err(e: dialoguer::Error) -> InstallError {
    InstallError::Io(e.into())
}

/// UI for interactive terminal sessions.
pub struct TerminalUI {
    term: Term,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stderr(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        println!("{} {}", style("✓").green(), msg);
    }

    fn warning(&mut self, msg: &str) {
        println!("{} {}", style("⚠").yellow(), msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{} {}", style("✗").red().bold(), msg);
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact_on(&self.term)
            .map_err(map_dialoguer_err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::start(message))
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
