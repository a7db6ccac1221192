//! # Split — Propose container weights.

use anyhow::{Context, Result};
use clap::Args;
use exco_rules::RuleCatalog;

/// Arguments for `exco split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Total shipment weight in kilograms.
    #[arg(long)]
    pub weight: f64,

    /// Number of containers (at least 2).
    #[arg(long)]
    pub containers: usize,
}

/// Execute the split subcommand.
pub fn run_split(args: &SplitArgs, catalog: &RuleCatalog) -> Result<u8> {
    let weights = exco_split::split(args.weight, args.containers, &catalog.bounds())
        .with_context(|| format!("cannot split {} kg into {} containers", args.weight, args.containers))?;

    for (i, weight) in weights.iter().enumerate() {
        println!("  container {}: {weight:.2} kg", i + 1);
    }
    println!("  total:       {:.2} kg", weights.iter().sum::<f64>());
    Ok(0)
}
