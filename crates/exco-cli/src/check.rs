//! # Check — Evaluate one request.
//!
//! Prints a JSON report of the request's violations. Exits with
//! [`EXIT_REJECTED`] when there are any.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use exco_compliance::{Evaluation, Violation};
use exco_rules::RuleCatalog;
use serde::Serialize;

use crate::{read_document, EXIT_REJECTED};

/// Arguments for `exco check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Submission document (YAML or JSON). Any `containers` are ignored.
    pub file: PathBuf,
}

/// Machine-readable check result.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub compliant: bool,
    /// Only overweight; resubmit with containers.
    pub requires_split: bool,
    pub violations: Vec<Violation>,
}

/// Evaluate the request in `args.file`.
pub fn check_file(args: &CheckArgs, catalog: &RuleCatalog) -> Result<CheckReport> {
    let doc = read_document(&args.file)?;
    let evaluation = Evaluation::of(&doc.request, catalog);
    Ok(CheckReport {
        compliant: evaluation.is_compliant(),
        requires_split: evaluation.requires_split(),
        violations: evaluation.into_violations(),
    })
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, catalog: &RuleCatalog) -> Result<u8> {
    let report = check_file(args, catalog)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if report.compliant {
        Ok(0)
    } else {
        tracing::debug!(
            file = %args.file.display(),
            violations = report.violations.len(),
            "request is not compliant"
        );
        Ok(EXIT_REJECTED)
    }
}
