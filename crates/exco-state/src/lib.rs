//! # exco-state — Shipment Records and Tracking
//!
//! Owns everything that outlives a single evaluation:
//!
//! - [`Shipment`] / [`ShipmentStatus`]: the persisted record of one container.
//! - [`IdSource`] / [`RandomIds`]: order and tracking id generation.
//! - [`ShipmentFactory`]: builds records, retrying tracking ids that collide.
//! - [`TrackingIndex`]: tracking id → record, queryable by order id.
//! - [`SharedTrackingIndex`]: a lock-guarded index for concurrent callers.
//!
//! ## Ownership
//!
//! There is no process-wide store. The caller owns the index and passes it
//! to the factory; its lifetime is the caller's. Nothing is persisted.
//!
//! ## Status
//!
//! ```text
//! Processing ──▶ InTransit ──▶ Delivered
//!      │
//!      ▼
//!   Rejected
//! ```
//!
//! The factory only ever produces `Processing`. Later states belong to the
//! carrier integration, which is not part of this crate.

pub mod error;
pub mod factory;
pub mod ids;
pub mod index;
pub mod shipment;

pub use error::StateError;
pub use factory::{ShipmentFactory, MAX_ID_ATTEMPTS};
pub use ids::{IdSource, RandomIds};
pub use index::{SharedTrackingIndex, TrackingIndex};
pub use shipment::{Shipment, ShipmentStatus};
