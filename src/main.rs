//! git2text-install CLI entry point.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use git2text_install::cli::{self, Cli};
use git2text_install::environment::ExecutionContext;
use git2text_install::installer;
use git2text_install::shell::is_ci;
use git2text_install::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("git2text_install=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("git2text_install=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("git2text-install starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // The confirmation gate needs a real terminal; CI and piped stdin get
    // the non-interactive UI, whose confirms resolve to their defaults.
    let interactive = !is_ci() && std::io::stdin().is_terminal();
    let mut ui = create_ui(interactive, output_mode);

    // The package to install is the local checkout this tool runs in.
    let package_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let ctx = ExecutionContext::probe();
    let procs = installer::default_process_context();

    match cli::run(&ctx, &package_dir, &procs, ui.as_mut()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            ui.error(&format!("Error: {e}"));
            ExitCode::from(1)
        }
    }
}
