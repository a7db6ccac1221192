//! # Container Plans
//!
//! A [`ContainerPlan`] is one physical container after splitting: its
//! weight, its share of declared value, and the items packed in it.

use exco_core::{ItemSet, ShipmentRequest, WeightBounds, WEIGHT_EPSILON};
use serde::{Deserialize, Serialize};

use crate::splitter::{check_split_request, split, SplitError};

/// What the caller wants in one container.
///
/// `weight_kg` is optional: containers without one receive the splitter's
/// proposed weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerAllocation {
    /// Explicit weight for this container, overriding the proposal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Declared value carried by this container.
    #[serde(default)]
    pub declared_value: f64,
    /// Items packed in this container.
    #[serde(default)]
    pub items: ItemSet,
}

/// One physical container of a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerPlan {
    /// Zero-based position within the split group.
    pub index: usize,
    /// Container weight in kilograms.
    pub weight_kg: f64,
    /// Declared value of the container's contents.
    pub declared_value: f64,
    /// Items in the container.
    pub items: ItemSet,
}

impl ContainerPlan {
    /// The plan for an unsplit request: one container holding everything.
    pub fn whole(request: &ShipmentRequest) -> Self {
        Self {
            index: 0,
            weight_kg: request.weight_kg,
            declared_value: request.declared_value,
            items: request.items.clone(),
        }
    }
}

/// Build container plans for a split of `total_kg`.
///
/// Allocations without an explicit weight take the weight proposed by
/// [`split`]. Explicit weights must each be within bounds, and the final
/// weights must sum to `total_kg`.
///
/// # Errors
///
/// Any [`SplitError`] from the proposal, plus
/// [`SplitError::WeightOutOfBounds`] and [`SplitError::WeightNotConserved`]
/// for explicit weights.
pub fn plan_containers(
    total_kg: f64,
    allocations: &[ContainerAllocation],
    bounds: &WeightBounds,
) -> Result<Vec<ContainerPlan>, SplitError> {
    let count = allocations.len();
    check_split_request(total_kg, count, bounds)?;

    let weights: Vec<f64> = if allocations.iter().all(|a| a.weight_kg.is_some()) {
        allocations.iter().filter_map(|a| a.weight_kg).collect()
    } else {
        let proposal = split(total_kg, count, bounds)?;
        allocations
            .iter()
            .zip(proposal)
            .map(|(a, proposed)| a.weight_kg.unwrap_or(proposed))
            .collect()
    };

    let mut plans = Vec::with_capacity(count);
    for (index, (allocation, weight_kg)) in allocations.iter().zip(weights).enumerate() {
        if !bounds.contains(weight_kg) {
            return Err(SplitError::WeightOutOfBounds {
                index,
                weight_kg,
                min_kg: bounds.min_kg(),
                max_kg: bounds.max_kg(),
            });
        }
        plans.push(ContainerPlan {
            index,
            weight_kg,
            declared_value: allocation.declared_value,
            items: allocation.items.clone(),
        });
    }

    let actual_kg: f64 = plans.iter().map(|p| p.weight_kg).sum();
    if (actual_kg - total_kg).abs() > WEIGHT_EPSILON {
        return Err(SplitError::WeightNotConserved {
            expected_kg: total_kg,
            actual_kg,
        });
    }

    Ok(plans)
}
