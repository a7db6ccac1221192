//! # exco-cli — Export Compliance Command Line
//!
//! Provides the `exco` command-line interface over the compliance crates.
//!
//! ## Subcommands
//!
//! - `exco check` — Evaluate one shipment request and print its violations.
//! - `exco split` — Propose container weights for an overweight shipment.
//! - `exco submit` — Run submission documents through one intake session.
//! - `exco catalog` — Print the validated rule catalog.
//!
//! ```bash
//! exco check demos/books-to-japan.yaml
//! exco split --weight 45 --containers 2
//! exco --catalog rules.yaml submit demos/*.yaml --order ORD-123456
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` error (bad input, unreadable file, invalid catalog),
//! `2` at least one request was non-compliant or rejected.

pub mod catalog;
pub mod check;
pub mod split;
pub mod submit;

use std::path::Path;

use anyhow::{Context, Result};
use exco_core::ShipmentRequest;
use exco_rules::RuleCatalog;
use exco_split::ContainerAllocation;
use serde::Deserialize;

/// Exit code for a non-compliant or rejected request.
pub const EXIT_REJECTED: u8 = 2;

/// A request as authored on disk, optionally with its container split.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionDocument {
    pub request: ShipmentRequest,
    /// Present for split submissions.
    #[serde(default)]
    pub containers: Option<Vec<ContainerAllocation>>,
}

/// Load the catalog at `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<RuleCatalog> {
    match path {
        Some(path) => RuleCatalog::load(path)
            .with_context(|| format!("invalid rule catalog: {}", path.display())),
        None => RuleCatalog::builtin().context("built-in rule catalog failed validation"),
    }
}

/// Read a submission document (YAML, or JSON by extension).
pub fn read_document(path: &Path) -> Result<SubmissionDocument> {
    exco_rules::parser::load_typed(path)
        .with_context(|| format!("failed to read submission: {}", path.display()))
}
