//! Subprocess execution and platform helpers.

pub mod command;
pub mod platform;

pub use command::{execute, execute_check, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated};
