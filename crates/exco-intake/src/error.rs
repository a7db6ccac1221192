//! Errors from the intake pipeline.

use exco_core::ItemTag;
use exco_split::SplitError;
use exco_state::StateError;
use thiserror::Error;

/// Inputs the pipeline cannot process.
///
/// Compliance failures are not errors; they come back as
/// [`Submission::Rejected`](crate::Submission::Rejected).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntakeError {
    /// A split was requested for a shipment that fits in one container.
    #[error("{weight_kg} kg does not exceed the {max_kg} kg container limit; submit it unsplit")]
    SplitNotRequired {
        /// Shipment weight.
        weight_kg: f64,
        /// Container maximum.
        max_kg: f64,
    },

    /// A container lists an item the shipment does not contain.
    #[error("container {container} lists {item}, which is not part of the shipment")]
    UnknownContainerItem {
        /// Zero-based container index.
        container: usize,
        /// The unexpected item.
        item: ItemTag,
    },

    /// The container weights could not be planned.
    #[error("split failed: {0}")]
    Split(#[from] SplitError),

    /// Record creation failed.
    #[error("record creation failed: {0}")]
    State(#[from] StateError),
}

/// Result alias for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;
