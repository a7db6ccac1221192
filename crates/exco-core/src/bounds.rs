//! # Weight Bounds
//!
//! Per-container weight limits. The defaults match the carrier limits the
//! rule catalog ships with: no container lighter than 1 kg or heavier than
//! 30 kg.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default lower bound for a single container, in kilograms.
pub const MIN_WEIGHT_KG: f64 = 1.0;
/// Default upper bound for a single container, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 30.0;
/// Tolerance for weight conservation checks.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Inclusive per-container weight bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct WeightBounds {
    min_kg: f64,
    max_kg: f64,
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    min_kg: f64,
    max_kg: f64,
}

impl WeightBounds {
    /// Create bounds, requiring finite `0 < min < max`.
    pub fn new(min_kg: f64, max_kg: f64) -> Result<Self, ValidationError> {
        if !min_kg.is_finite() || !max_kg.is_finite() || min_kg <= 0.0 || min_kg >= max_kg {
            return Err(ValidationError::InvalidBounds { min_kg, max_kg });
        }
        Ok(Self { min_kg, max_kg })
    }

    /// Lower bound in kilograms.
    pub fn min_kg(&self) -> f64 {
        self.min_kg
    }

    /// Upper bound in kilograms.
    pub fn max_kg(&self) -> f64 {
        self.max_kg
    }

    /// Whether `weight_kg` lies within `[min, max]`, allowing [`WEIGHT_EPSILON`]
    /// of slack on either side for accumulated float error.
    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg.is_finite()
            && weight_kg >= self.min_kg - WEIGHT_EPSILON
            && weight_kg <= self.max_kg + WEIGHT_EPSILON
    }

    /// Whether `weight_kg` needs more than one container.
    pub fn exceeds_max(&self, weight_kg: f64) -> bool {
        weight_kg > self.max_kg + WEIGHT_EPSILON
    }

    /// Fewest containers of at most `max_kg` that could hold `weight_kg`.
    pub fn min_containers_for(&self, weight_kg: f64) -> usize {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return 0;
        }
        ((weight_kg - WEIGHT_EPSILON) / self.max_kg).ceil().max(1.0) as usize
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            min_kg: MIN_WEIGHT_KG,
            max_kg: MAX_WEIGHT_KG,
        }
    }
}

impl TryFrom<RawBounds> for WeightBounds {
    type Error = ValidationError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.min_kg, raw.max_kg)
    }
}

impl From<WeightBounds> for RawBounds {
    fn from(bounds: WeightBounds) -> Self {
        Self {
            min_kg: bounds.min_kg,
            max_kg: bounds.max_kg,
        }
    }
}
