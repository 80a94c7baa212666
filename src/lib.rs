//! git2text-install - Interactive installer and locator for the git2text CLI.
//!
//! Installs the local `git2text` package in editable mode (preferring `uv`,
//! with a pip fallback inside virtual environments) and then locates the
//! installed executable across platform-specific install schemes.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and the sequential install flow
//! - [`discovery`] - Installed-executable location and the module probe
//! - [`environment`] - Execution-context snapshot (platform, venv, interpreter)
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Package-manager invocation policy
//! - [`shell`] - Subprocess execution and platform helpers
//! - [`ui`] - Prompts, spinners, and terminal output

pub mod cli;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod installer;
pub mod shell;
pub mod ui;

pub use error::{InstallError, Result};
