//! Error types for installer operations.
//!
//! This module defines [`InstallError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `InstallError` for failures that need distinct handling and messaging
//! - Use `anyhow::Error` (via `InstallError::Other`) for unexpected errors
//! - A declined confirmation is NOT an error: the flow exits 0 directly
//! - A discovery miss is NOT an error: it degrades to warnings plus a
//!   diagnostic module probe

use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The preferred package manager is not available and no fallback applies.
    #[error("{manager} is not available in the current environment. {hint}")]
    ManagerUnavailable { manager: String, hint: String },

    /// The package manager ran but returned a failure status.
    #[error("An error occurred while installing the package: {manager} exited with code {code:?}")]
    InstallFailed {
        manager: String,
        code: Option<i32>,
    },

    /// A subprocess could not be spawned or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallError>;
