//! # Weight Splitter
//!
//! Greedy first-fit-then-even-split:
//!
//! ```text
//! weights[0]     = max
//! weights[1..n]  = min(max, (total - max) / (n - 1))
//! ```
//!
//! The heuristic does not search for a feasible count. If the even share
//! would exceed the maximum, the requested count is too small; if it would
//! fall below the minimum, the count is too large. Both are reported as
//! errors carrying enough context for the caller to pick another count.

use exco_core::{WeightBounds, WEIGHT_EPSILON};
use thiserror::Error;

/// Errors from weight splitting and container planning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// Total weight is not a positive finite number.
    #[error("total weight must be positive and finite, got {total_kg}")]
    InvalidWeight {
        /// The rejected total.
        total_kg: f64,
    },

    /// Fewer than two containers were requested.
    #[error("a split needs at least 2 containers, got {requested}")]
    TooFewContainers {
        /// Requested container count.
        requested: usize,
    },

    /// The shipment already fits in one container.
    #[error("{total_kg} kg fits in a single {max_kg} kg container; no split required")]
    NotOverweight {
        /// Total weight.
        total_kg: f64,
        /// Container maximum.
        max_kg: f64,
    },

    /// The requested containers cannot hold the weight within the maximum.
    #[error(
        "{requested} containers cannot carry {total_kg} kg at {max_kg} kg each; at least {minimum} required"
    )]
    InsufficientContainers {
        /// Total weight.
        total_kg: f64,
        /// Requested container count.
        requested: usize,
        /// Container maximum.
        max_kg: f64,
        /// Fewest containers that could carry the total.
        minimum: usize,
    },

    /// A container would carry less than the minimum.
    #[error("container {index} would carry {weight_kg} kg, below the {min_kg} kg minimum")]
    UnderweightContainer {
        /// Zero-based container index.
        index: usize,
        /// The offending weight.
        weight_kg: f64,
        /// Container minimum.
        min_kg: f64,
    },

    /// An explicitly assigned container weight is out of bounds.
    #[error("container {index} weight {weight_kg} kg is outside {min_kg}..={max_kg} kg")]
    WeightOutOfBounds {
        /// Zero-based container index.
        index: usize,
        /// The offending weight.
        weight_kg: f64,
        /// Container minimum.
        min_kg: f64,
        /// Container maximum.
        max_kg: f64,
    },

    /// Container weights do not add up to the shipment weight.
    #[error("container weights sum to {actual_kg} kg but the shipment weighs {expected_kg} kg")]
    WeightNotConserved {
        /// Shipment weight.
        expected_kg: f64,
        /// Sum of container weights.
        actual_kg: f64,
    },
}

/// Check the preconditions shared by every split.
pub(crate) fn check_split_request(
    total_kg: f64,
    count: usize,
    bounds: &WeightBounds,
) -> Result<(), SplitError> {
    if !total_kg.is_finite() || total_kg <= 0.0 {
        return Err(SplitError::InvalidWeight { total_kg });
    }
    if count < 2 {
        return Err(SplitError::TooFewContainers { requested: count });
    }
    if !bounds.exceeds_max(total_kg) {
        return Err(SplitError::NotOverweight {
            total_kg,
            max_kg: bounds.max_kg(),
        });
    }
    Ok(())
}

/// Split `total_kg` across exactly `count` containers.
///
/// # Errors
///
/// - [`SplitError::InvalidWeight`], [`SplitError::TooFewContainers`],
///   [`SplitError::NotOverweight`] for unusable inputs.
/// - [`SplitError::InsufficientContainers`] if `count` full containers
///   fall more than the weight tolerance short of `total_kg`.
/// - [`SplitError::UnderweightContainer`] if the even share is below the
///   minimum.
pub fn split(total_kg: f64, count: usize, bounds: &WeightBounds) -> Result<Vec<f64>, SplitError> {
    check_split_request(total_kg, count, bounds)?;

    let max_kg = bounds.max_kg();
    let share = (total_kg - max_kg) / (count - 1) as f64;

    // Any capacity shortfall beyond the tolerance would be lost by the cap below.
    if total_kg - max_kg * count as f64 > WEIGHT_EPSILON {
        return Err(SplitError::InsufficientContainers {
            total_kg,
            requested: count,
            max_kg,
            minimum: bounds.min_containers_for(total_kg).max(count + 1),
        });
    }
    let share = share.min(max_kg);
    if share < bounds.min_kg() - WEIGHT_EPSILON {
        return Err(SplitError::UnderweightContainer {
            index: 1,
            weight_kg: share,
            min_kg: bounds.min_kg(),
        });
    }

    let mut weights = Vec::with_capacity(count);
    weights.push(max_kg);
    weights.extend(std::iter::repeat(share).take(count - 1));

    let sum: f64 = weights.iter().sum();
    if (sum - total_kg).abs() > WEIGHT_EPSILON {
        return Err(SplitError::WeightNotConserved {
            expected_kg: total_kg,
            actual_kg: sum,
        });
    }

    tracing::debug!(total_kg, count, share, "split shipment weight");
    Ok(weights)
}
