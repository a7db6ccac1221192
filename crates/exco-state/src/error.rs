//! Errors from shipment record creation and indexing.

use exco_core::TrackingId;
use thiserror::Error;

/// Errors raised by the factory and the tracking index.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// A record with this tracking id is already indexed.
    #[error("tracking id {tracking_id} is already indexed")]
    DuplicateTrackingId {
        /// The colliding id.
        tracking_id: TrackingId,
    },

    /// No unused identifier was found within the retry budget.
    #[error("no unused {kind} found after {attempts} attempts")]
    IdSpaceExhausted {
        /// Identifier kind ("order id", "tracking id").
        kind: &'static str,
        /// Attempts made.
        attempts: usize,
    },

    /// A shipment record needs a recipient country.
    #[error("cannot create a shipment without a recipient country")]
    MissingRecipient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_display_shows_id() {
        let err = StateError::DuplicateTrackingId {
            tracking_id: TrackingId::wrapping(42),
        };
        assert!(err.to_string().contains("TRK-100042"));
    }

    #[test]
    fn exhausted_display() {
        let err = StateError::IdSpaceExhausted {
            kind: "tracking id",
            attempts: 64,
        };
        assert_eq!(err.to_string(), "no unused tracking id found after 64 attempts");
    }
}
