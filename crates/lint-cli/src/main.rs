//! lintforge CLI
//!
//! Composes the lint configuration for the surrounding project and prints
//! it as JSON. When required packages are missing they are installed and
//! the process exits with a distinguished status so callers know to run
//! again.

mod cli;

use clap::Parser;
use colored::Colorize;
use lint_components::define_config;
use lint_core::{ConfigArtifact, PipelineOutcome, Result};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;

/// Exit status signalling "dependencies were installed, run again".
const RESTART_EXIT_CODE: i32 = 254;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match run(&cli) {
        Ok(PipelineOutcome::Ready(config)) => print_config(&cli, &config),
        Ok(PipelineOutcome::NeedsRestart { installed }) => {
            eprintln!(
                "{}: installed {}; run lintforge again to produce the configuration",
                "note".yellow().bold(),
                installed.join(", ")
            );
            std::process::exit(RESTART_EXIT_CODE);
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn run(cli: &Cli) -> Result<PipelineOutcome> {
    let base_dir = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    define_config(base_dir, |api| {
        if cli.node {
            api.use_node()?;
        }
        for tsconfig in &cli.typescript {
            api.use_typescript(tsconfig)?;
        }
        if cli.promise {
            api.use_promise()?;
        }
        if cli.prettier {
            api.use_prettier()?;
        }
        for name in &cli.extend {
            api.extend(name)?;
        }

        let mut overrides = ConfigArtifact::new();
        overrides.insert("root", json!(true));
        if cli.report_unused_disable_directives {
            overrides.insert("reportUnusedDisableDirectives", json!(true));
        }
        Ok(overrides)
    })
}

fn print_config(cli: &Cli, config: &ConfigArtifact) {
    let rendered = if cli.compact {
        serde_json::to_string(config)
    } else {
        serde_json::to_string_pretty(config)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    std::process::exit(1);
}
