//! # Identifier Generation
//!
//! Order and tracking ids are six random digits behind a prefix
//! (`ORD-482913`, `TRK-105577`). The space is small enough that collisions
//! happen in practice, so generation is separated from uniqueness: an
//! [`IdSource`] only proposes ids, and the factory checks them against the
//! tracking index.

use exco_core::{OrderId, TrackingId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Proposes candidate identifiers. Uniqueness is not its concern.
pub trait IdSource: Send {
    /// Propose an order id.
    fn next_order_id(&mut self) -> OrderId;

    /// Propose a tracking id.
    fn next_tracking_id(&mut self) -> TrackingId;
}

/// Uniformly random ids from a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

/// Number of distinct six-digit bodies.
const BODY_SPACE: u32 = 900_000;

impl RandomIds {
    /// Seed from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_order_id(&mut self) -> OrderId {
        OrderId::wrapping(self.rng.gen_range(0..BODY_SPACE))
    }

    fn next_tracking_id(&mut self) -> TrackingId {
        TrackingId::wrapping(self.rng.gen_range(0..BODY_SPACE))
    }
}
