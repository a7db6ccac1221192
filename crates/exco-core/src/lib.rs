//! # exco-core — Foundational Types for Export Compliance
//!
//! This crate defines the value types every other `exco-*` crate speaks.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Country`, `ItemTag`,
//!    `OrderId`, `TrackingId` are all newtypes with validated constructors.
//!    No bare strings for identifiers.
//!
//! 2. **Explicit set types.** Item selections are [`ItemSet`]s, so conflict
//!    detection is a superset test rather than list containment.
//!
//! 3. **Immutable requests.** A [`ShipmentRequest`] is a plain value; the
//!    evaluator reads it and never mutates it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `exco-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bounds;
pub mod error;
pub mod identity;
pub mod items;
pub mod request;

// Re-export primary types for ergonomic imports.
pub use bounds::{WeightBounds, MAX_WEIGHT_KG, MIN_WEIGHT_KG, WEIGHT_EPSILON};
pub use error::ValidationError;
pub use identity::{Country, ItemTag, OrderId, TrackingId};
pub use items::ItemSet;
pub use request::{RequiredField, ShipmentRequest, ShippingService};
