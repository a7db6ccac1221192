//! # exco-intake — Shipment Intake Pipeline
//!
//! Ties evaluation, splitting, and record creation into the flow a shipper
//! goes through:
//!
//! ```text
//! ShipmentRequest ──▶ evaluate ──┬─ compliant ─────────▶ 1 Shipment
//!                                ├─ overweight only ──▶ split ──▶ evaluate
//!                                │                       each container ──▶ N Shipments
//!                                └─ anything else ────▶ Rejected
//! ```
//!
//! A rejected submission is a normal outcome, returned as
//! [`Submission::Rejected`]. [`IntakeError`] is reserved for inputs the
//! pipeline cannot act on at all.
//!
//! The [`Intake`] owns its [`TrackingIndex`](exco_state::TrackingIndex);
//! callers read it through [`Intake::index`] or take it with
//! [`Intake::into_index`].

pub mod error;
pub mod intake;
pub mod submission;

pub use error::{IntakeError, IntakeResult};
pub use intake::Intake;
pub use submission::{Rejection, Submission};
