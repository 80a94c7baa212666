//! Package installation.
//!
//! Implements the install policy around `uv` and `pip`:
//!
//! - inside a virtual environment, `uv pip install -e <dir>` is attempted
//!   first and `<python> -m pip install -e <dir>` is tried exactly once as a
//!   fallback;
//! - outside a virtual environment, `uv` is probed with `--version` and used
//!   alone — there is deliberately no pip fallback in that branch, and any
//!   failure terminates with remediation guidance.

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::environment::ExecutionContext;
use crate::error::{InstallError, Result};
use crate::shell::{self, CommandOptions, CommandResult};
use crate::ui::UserInterface;

/// The Python package installed by this tool.
pub const PACKAGE_NAME: &str = "git2text";

/// Guidance shown when `uv` cannot be used outside a virtual environment.
pub const UV_INSTALL_HINT: &str = "Please install uv or use a Python interpreter that has pip \
installed. You can install uv with: curl -LsSf https://astral.sh/uv/install.sh | sh";

/// Which package manager performed the install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manager {
    Uv,
    Pip,
}

impl Manager {
    pub fn display_name(self) -> &'static str {
        match self {
            Manager::Uv => "uv pip",
            Manager::Pip => "pip",
        }
    }
}

/// Successful installation outcome.
#[derive(Debug, Clone, Copy)]
pub struct InstallOutcome {
    pub manager: Manager,
}

/// Mockable process invocations for installation and discovery probes.
pub struct ProcessContext<'a> {
    /// Run a command with inherited stdio; the user sees its output live.
    pub run: &'a dyn Fn(&str, &[&str]) -> io::Result<CommandResult>,
    /// Run a command quietly, capturing output, optionally bounded.
    pub probe: &'a dyn Fn(&str, &[&str], Option<Duration>) -> io::Result<CommandResult>,
}

/// Build the default `ProcessContext` for production use.
pub fn default_process_context() -> ProcessContext<'static> {
    ProcessContext {
        run: &|program, args| shell::execute(program, args, &CommandOptions::default()),
        probe: &|program, args, timeout| {
            let options = match timeout {
                Some(t) => CommandOptions::captured_with_timeout(t),
                None => CommandOptions::captured(),
            };
            shell::execute(program, args, &options)
        },
    }
}

/// Install the package in editable mode from `package_dir`.
pub fn install_editable(
    ctx: &ExecutionContext,
    package_dir: &Path,
    procs: &ProcessContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<InstallOutcome> {
    ui.message("Installing the package...");
    let dir = package_dir.to_string_lossy().to_string();

    if ctx.in_virtual_env() {
        install_in_venv(ctx, &dir, procs, ui)
    } else {
        install_system_wide(&dir, procs, ui)
    }
}

/// Venv branch: uv first, one pip fallback.
fn install_in_venv(
    ctx: &ExecutionContext,
    dir: &str,
    procs: &ProcessContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<InstallOutcome> {
    match (procs.run)("uv", &["pip", "install", "-e", dir]) {
        Ok(r) if r.success => {
            ui.success("Package installed successfully using uv pip.");
            return Ok(InstallOutcome {
                manager: Manager::Uv,
            });
        }
        Ok(r) => {
            tracing::debug!(code = ?r.exit_code, "uv pip install failed, falling back to pip");
        }
        Err(e) => {
            tracing::debug!(error = %e, "uv not invokable, falling back to pip");
        }
    }

    let python = python_command(ctx);
    match (procs.run)(&python, &["-m", "pip", "install", "-e", dir]) {
        Ok(r) if r.success => {
            ui.success("Package installed successfully using pip.");
            Ok(InstallOutcome {
                manager: Manager::Pip,
            })
        }
        Ok(r) => Err(InstallError::InstallFailed {
            manager: "pip".to_string(),
            code: r.exit_code,
        }),
        Err(_) => Err(InstallError::CommandFailed {
            command: format!("{python} -m pip install -e {dir}"),
            code: None,
        }),
    }
}

/// System branch: uv only. A missing or failing uv is terminal with guidance;
/// pip is never attempted here.
fn install_system_wide(
    dir: &str,
    procs: &ProcessContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<InstallOutcome> {
    let unavailable = || InstallError::ManagerUnavailable {
        manager: "uv".to_string(),
        hint: UV_INSTALL_HINT.to_string(),
    };

    match (procs.probe)("uv", &["--version"], None) {
        Ok(r) if r.success => {
            if let Some(version) = parse_manager_version(&r.stdout) {
                ui.message(&format!("Using uv {version}."));
            }
        }
        _ => return Err(unavailable()),
    }

    match (procs.run)("uv", &["pip", "install", "-e", dir]) {
        Ok(r) if r.success => {
            ui.success("Package installed successfully using uv pip.");
            Ok(InstallOutcome {
                manager: Manager::Uv,
            })
        }
        _ => Err(unavailable()),
    }
}

/// The interpreter used for `-m pip` and `-m git2text` invocations.
pub fn python_command(ctx: &ExecutionContext) -> String {
    match &ctx.interpreter {
        Some(path) => path.to_string_lossy().to_string(),
        None => {
            if cfg!(windows) {
                "python".to_string()
            } else {
                "python3".to_string()
            }
        }
    }
}

/// Extract a dotted version from package-manager `--version` output.
fn parse_manager_version(output: &str) -> Option<String> {
    let re = regex::Regex::new(r"(\d+\.\d+(?:\.\d+)?)").ok()?;
    re.captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
