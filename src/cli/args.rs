//! CLI argument definitions.
//!
//! The installer takes no operands: it always installs the package in the
//! current directory. The flags here only control output.

use clap::Parser;

/// Install the local git2text package and locate its executable.
#[derive(Debug, Parser)]
#[command(name = "git2text-install")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
