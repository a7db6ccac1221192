//! # Submit — Run documents through one intake session.
//!
//! Every file shares one tracking index, so `--order` can look up any order
//! accepted during the run. Documents with `containers` go through the split
//! flow; the rest are submitted whole.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use exco_intake::{Intake, Submission};
use exco_rules::RuleCatalog;
use exco_state::{RandomIds, Shipment};
use serde::Serialize;

use crate::{read_document, EXIT_REJECTED};

/// Arguments for `exco submit`.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Submission documents (YAML or JSON), processed in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// After submitting, list the shipments recorded under this order id.
    #[arg(long)]
    pub order: Option<String>,

    /// Seed for id generation, for reproducible ids.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct Decision<'a> {
    file: &'a Path,
    #[serde(flatten)]
    submission: Submission,
}

#[derive(Debug, Serialize)]
struct SubmitReport<'a> {
    submissions: Vec<Decision<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<Vec<Shipment>>,
}

/// Execute the submit subcommand.
pub fn run_submit(args: &SubmitArgs, catalog: &RuleCatalog) -> Result<u8> {
    let ids = match args.seed {
        Some(seed) => RandomIds::seeded(seed),
        None => RandomIds::new(),
    };
    let mut intake = Intake::new(catalog.clone(), ids);

    let mut submissions = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let doc = read_document(file)?;
        let submission = match &doc.containers {
            Some(containers) => intake.submit_split(&doc.request, containers),
            None => intake.submit(&doc.request),
        }
        .with_context(|| format!("cannot process submission: {}", file.display()))?;
        submissions.push(Decision { file, submission });
    }

    let order = args.order.as_deref().map(|order_id| {
        intake
            .index()
            .find_by_order_id(order_id)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    let any_rejected = submissions.iter().any(|d| !d.submission.is_accepted());
    let report = SubmitReport { submissions, order };
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::debug!(recorded = intake.index().len(), "submission run complete");
    Ok(if any_rejected { EXIT_REJECTED } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLIT_DOC: &str = r#"
request:
  sender_name: Ana
  sender_country: UK
  recipient_country: Japan
  items: [Books, Clothing]
  declared_value: 120
  weight_kg: 45
  service: FedEx
containers:
  - declared_value: 80
    items: [Books]
  - declared_value: 40
    items: [Clothing]
"#;

    const REJECTED_DOC: &str = r#"{
  "request": {
    "sender_name": "Ana",
    "sender_country": "USA",
    "recipient_country": "Iran",
    "items": ["Books"],
    "declared_value": 10,
    "weight_kg": 2,
    "service": "UPS"
  }
}"#;

    #[test]
    fn accepted_run_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("split.yaml");
        std::fs::write(&path, SPLIT_DOC).unwrap();
        let args = SubmitArgs {
            files: vec![path],
            order: None,
            seed: Some(1),
        };
        let catalog = RuleCatalog::builtin().unwrap();
        assert_eq!(run_submit(&args, &catalog).unwrap(), 0);
    }

    #[test]
    fn any_rejection_exits_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let split = dir.path().join("split.yaml");
        let rejected = dir.path().join("rejected.json");
        std::fs::write(&split, SPLIT_DOC).unwrap();
        std::fs::write(&rejected, REJECTED_DOC).unwrap();
        let args = SubmitArgs {
            files: vec![split, rejected],
            order: Some("ORD-100000".into()),
            seed: Some(1),
        };
        let catalog = RuleCatalog::builtin().unwrap();
        assert_eq!(run_submit(&args, &catalog).unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn split_of_light_shipment_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("light.yaml");
        std::fs::write(&path, SPLIT_DOC.replace("weight_kg: 45", "weight_kg: 20")).unwrap();
        let args = SubmitArgs {
            files: vec![path],
            order: None,
            seed: None,
        };
        let catalog = RuleCatalog::builtin().unwrap();
        let err = run_submit(&args, &catalog).unwrap_err();
        assert!(format!("{err:#}").contains("light.yaml"));
    }

    #[test]
    fn demo_documents_are_accepted() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let args = SubmitArgs {
            files: vec![
                demos.join("books-to-japan.yaml"),
                demos.join("overweight-split.yaml"),
            ],
            order: None,
            seed: Some(7),
        };
        let catalog = RuleCatalog::builtin().unwrap();
        assert_eq!(run_submit(&args, &catalog).unwrap(), 0);
    }
}
