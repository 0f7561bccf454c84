//! # insp CLI entry point
//!
//! Parses command-line arguments, loads the optional config file and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use insp_cli::config::CliConfig;
use insp_cli::run::{run_run, RunArgs};
use insp_cli::session::{run_session, SessionArgs};
use insp_cli::templates::{run_templates, TemplatesArgs};

/// Electrical inspection checklists.
///
/// Runs equipment inspections against built-in or custom checklist
/// templates and scores them PASS, FAIL or ADVISORY.
#[derive(Parser, Debug)]
#[command(name = "insp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List or show checklist templates.
    Templates(TemplatesArgs),

    /// Run an inspection from an answers file and print the record.
    Run(RunArgs),

    /// Interactive inspection shell.
    Session(SessionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "insp CLI starting");

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| {
        let catalog = config.build_catalog()?;
        tracing::debug!(templates = catalog.len(), "catalog ready");
        match &cli.command {
            Commands::Templates(args) => run_templates(args, &catalog),
            Commands::Run(args) => run_run(args, &catalog, &config),
            Commands::Session(args) => run_session(args, &catalog, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
