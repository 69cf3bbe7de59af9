//! Argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Compose the project's lint configuration and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "lintforge", version, about)]
pub struct Cli {
    /// Directory to start project discovery from (defaults to the current
    /// directory).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable the Node.js rules.
    #[arg(long)]
    pub node: bool,

    /// Enable TypeScript linting against the given tsconfig (repeatable).
    #[arg(long, value_name = "TSCONFIG")]
    pub typescript: Vec<String>,

    /// Enable the promise-hygiene rules.
    #[arg(long)]
    pub promise: bool,

    /// Enable prettier compatibility (switches conflicting rules off).
    #[arg(long)]
    pub prettier: bool,

    /// Merge an extra shared rule set by name (repeatable).
    #[arg(long, value_name = "NAME")]
    pub extend: Vec<String>,

    /// Flag unused eslint-disable directives in the emitted configuration.
    #[arg(long)]
    pub report_unused_disable_directives: bool,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
