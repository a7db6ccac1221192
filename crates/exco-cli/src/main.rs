//! # exco CLI entry point
//!
//! Parses arguments, installs logging, loads the rule catalog, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exco_cli::catalog::{run_catalog, CatalogArgs};
use exco_cli::check::{run_check, CheckArgs};
use exco_cli::load_catalog;
use exco_cli::split::{run_split, SplitArgs};
use exco_cli::submit::{run_submit, SubmitArgs};

/// Export compliance checks for outgoing shipments.
///
/// Evaluates shipment requests against a rule catalog of restricted goods,
/// closed routes, incompatible goods, and container weight limits.
#[derive(Parser, Debug)]
#[command(name = "exco", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Rule catalog (YAML or JSON). Defaults to the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a shipment request and print its violations.
    Check(CheckArgs),

    /// Propose container weights for an overweight shipment.
    Split(SplitArgs),

    /// Submit shipment documents and record accepted shipments.
    Submit(SubmitArgs),

    /// Print the validated rule catalog.
    Catalog(CatalogArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let catalog = match load_catalog(cli.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &catalog),
        Commands::Split(args) => run_split(args, &catalog),
        Commands::Submit(args) => run_submit(args, &catalog),
        Commands::Catalog(args) => run_catalog(args, &catalog),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
