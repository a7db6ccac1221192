//! # Error Types
//!
//! Construction-time validation failures for core value types. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A value failed validation at construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A country name was empty after trimming.
    #[error("country name must not be empty")]
    EmptyCountry,

    /// An item tag was empty after trimming.
    #[error("item tag must not be empty")]
    EmptyItemTag,

    /// An identifier did not match its `PREFIX-NNNNNN` format.
    #[error("invalid {kind} {input:?}: expected {prefix}-NNNNNN")]
    MalformedId {
        /// Identifier kind ("order id", "tracking id").
        kind: &'static str,
        /// Expected prefix.
        prefix: &'static str,
        /// The rejected input.
        input: String,
    },

    /// Weight bounds are not finite or not ordered `0 < min < max`.
    #[error("invalid weight bounds: min {min_kg} kg, max {max_kg} kg")]
    InvalidBounds {
        /// Lower bound in kilograms.
        min_kg: f64,
        /// Upper bound in kilograms.
        max_kg: f64,
    },
}
