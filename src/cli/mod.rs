//! Command-line interface and the installation flow.
//!
//! The flow is strictly sequential: confirm intent, install the package,
//! locate the executable, report the outcome. The only retry anywhere is the
//! single pip fallback inside the installer's venv branch.

pub mod args;

pub use args::Cli;

use std::path::Path;

use crate::discovery;
use crate::environment::ExecutionContext;
use crate::error::Result;
use crate::installer::{self, ProcessContext, PACKAGE_NAME};
use crate::ui::UserInterface;

/// Question shown before a system-wide (non-venv) install. Default is No;
/// anything but an explicit yes aborts cleanly.
pub const CONFIRM_QUESTION: &str = "Do you want to continue with the installation?";

/// Run the installation flow and return the process exit code.
///
/// A declined confirmation returns `Ok(0)`. A discovery miss is non-fatal.
/// Installation errors propagate to the caller, which renders them and
/// exits 1.
pub fn run(
    ctx: &ExecutionContext,
    package_dir: &Path,
    procs: &ProcessContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    if ctx.in_virtual_env() {
        ui.success("Running in virtual environment.");
    } else {
        ui.warning(&format!(
            "You are about to install {PACKAGE_NAME} in the system Python environment."
        ));
        if !ui.confirm(CONFIRM_QUESTION, false)? {
            ui.message("Installation aborted by user.");
            return Ok(0);
        }
    }

    installer::install_editable(ctx, package_dir, procs, ui)?;

    match discovery::locate_executable(ctx) {
        Some(scripts_path) => {
            let binary = scripts_path.join(ctx.platform.executable_name(PACKAGE_NAME));
            ui.success(&format!(
                "Found {PACKAGE_NAME} binary at: {}",
                binary.display()
            ));
            ui.success(&format!(
                "Python Scripts path: {}",
                scripts_path.display()
            ));
        }
        None => {
            ui.warning("Could not find the binary in any standard scripts directories.");
            ui.warning(
                "The package was installed but the binary location could not be determined.",
            );

            let python = installer::python_command(ctx);
            let mut spinner =
                ui.start_spinner(&format!("Checking whether {PACKAGE_NAME} runs as a module"));
            if discovery::module_invokable(ctx, procs) {
                spinner.finish_success(&format!(
                    "The package can be run as a Python module: {python} -m {PACKAGE_NAME}"
                ));
            } else {
                spinner.finish_error("Cannot run as module either");
            }
        }
    }

    ui.message("Installation completed!");
    Ok(0)
}
