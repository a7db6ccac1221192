//! # exco-compliance — Shipment Compliance Evaluation
//!
//! Applies a [`RuleCatalog`](exco_rules::RuleCatalog) to a
//! [`ShipmentRequest`](exco_core::ShipmentRequest) and reports every reason
//! the shipment may not travel.
//!
//! ## Architecture
//!
//! ```text
//! exco-rules (data)  -->  exco-compliance (evaluation)  -->  Vec<Violation>
//!   RuleCatalog             evaluate()                         empty = compliant
//! ```
//!
//! ## Evaluation Contract
//!
//! - Pure: no I/O, no mutation, same inputs give the same list.
//! - Exhaustive: every check runs, so one pass reports everything.
//! - Ordered: MissingField, ConflictingDestination, RestrictedItem,
//!   ItemConflict, WeightExceeded.
//!
//! A failing shipment is a normal result, not an error. This crate has no
//! error type.

pub mod evaluator;
pub mod violation;

pub use evaluator::{evaluate, Evaluation};
pub use violation::{requires_split, Violation, ViolationKind};
