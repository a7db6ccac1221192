//! # Violations
//!
//! A [`Violation`] is one reason a shipment fails compliance. Each variant
//! carries the structured facts behind it; `Display` renders the message
//! shown to the shipper.

use std::fmt;

use exco_core::{Country, ItemSet, ItemTag, RequiredField, WeightBounds};
use serde::{Deserialize, Serialize};

/// The tag of a [`Violation`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationKind {
    MissingField,
    ConflictingDestination,
    RestrictedItem,
    ItemConflict,
    WeightExceeded,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingField => "MISSING_FIELD",
            Self::ConflictingDestination => "CONFLICTING_DESTINATION",
            Self::RestrictedItem => "RESTRICTED_ITEM",
            Self::ItemConflict => "ITEM_CONFLICT",
            Self::WeightExceeded => "WEIGHT_EXCEEDED",
        };
        f.write_str(s)
    }
}

/// A single compliance failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// One or more required fields are absent or non-positive.
    MissingField { fields: Vec<RequiredField> },
    /// The origin may not ship to the destination.
    ConflictingDestination { sender: Country, recipient: Country },
    /// The destination does not accept this item.
    RestrictedItem { item: ItemTag, country: Country },
    /// These items may not share a parcel.
    ItemConflict { items: ItemSet },
    /// Weight lies outside the per-container bounds.
    WeightExceeded {
        weight_kg: f64,
        min_kg: f64,
        max_kg: f64,
    },
}

impl Violation {
    /// The violation's tag.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::MissingField { .. } => ViolationKind::MissingField,
            Self::ConflictingDestination { .. } => ViolationKind::ConflictingDestination,
            Self::RestrictedItem { .. } => ViolationKind::RestrictedItem,
            Self::ItemConflict { .. } => ViolationKind::ItemConflict,
            Self::WeightExceeded { .. } => ViolationKind::WeightExceeded,
        }
    }

    /// The message shown to the shipper, e.g. "Alcohol is restricted in
    /// UAE". Same text as the `Display` impl.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { fields } => {
                f.write_str("missing required fields: ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                Ok(())
            }
            Self::ConflictingDestination { sender, recipient } => {
                write!(f, "shipments from {sender} to {recipient} are not allowed")
            }
            Self::RestrictedItem { item, country } => {
                write!(f, "{item} is restricted in {country}")
            }
            Self::ItemConflict { items } => {
                write!(f, "items {items} cannot be shipped together")
            }
            Self::WeightExceeded {
                weight_kg,
                min_kg,
                max_kg,
            } => {
                if weight_kg > max_kg {
                    write!(
                        f,
                        "{weight_kg} kg exceeds the {max_kg} kg container limit; split the shipment"
                    )
                } else {
                    write!(f, "{weight_kg} kg is below the {min_kg} kg container minimum")
                }
            }
        }
    }
}

/// Whether the only thing wrong is weight above the container maximum.
///
/// That is the one failure a split can cure; anything else must be fixed by
/// the shipper first.
pub fn requires_split(violations: &[Violation], bounds: &WeightBounds) -> bool {
    match violations {
        [Violation::WeightExceeded { weight_kg, .. }] => bounds.exceeds_max(*weight_kg),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str) -> Country {
        Country::new(name).unwrap()
    }

    #[test]
    fn kind_matches_variant() {
        let v = Violation::RestrictedItem {
            item: ItemTag::new("Alcohol").unwrap(),
            country: country("UAE"),
        };
        assert_eq!(v.kind(), ViolationKind::RestrictedItem);
        assert_eq!(v.detail(), "Alcohol is restricted in UAE");
    }

    #[test]
    fn missing_field_lists_fields() {
        let v = Violation::MissingField {
            fields: vec![RequiredField::SenderName, RequiredField::Weight],
        };
        assert_eq!(v.to_string(), "missing required fields: sender name, weight");
    }

    #[test]
    fn weight_message_distinguishes_over_and_under() {
        let over = Violation::WeightExceeded {
            weight_kg: 45.0,
            min_kg: 1.0,
            max_kg: 30.0,
        };
        assert!(over.to_string().contains("split"));
        let under = Violation::WeightExceeded {
            weight_kg: 0.5,
            min_kg: 1.0,
            max_kg: 30.0,
        };
        assert!(under.to_string().contains("below"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let v = Violation::ConflictingDestination {
            sender: country("India"),
            recipient: country("Canada"),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "conflicting_destination");
        assert_eq!(json["recipient"], "Canada");
    }

    #[test]
    fn requires_split_only_for_sole_overweight() {
        let bounds = WeightBounds::default();
        let over = Violation::WeightExceeded {
            weight_kg: 45.0,
            min_kg: 1.0,
            max_kg: 30.0,
        };
        let under = Violation::WeightExceeded {
            weight_kg: 0.2,
            min_kg: 1.0,
            max_kg: 30.0,
        };
        let restricted = Violation::RestrictedItem {
            item: ItemTag::new("Medicine").unwrap(),
            country: country("UK"),
        };
        assert!(requires_split(&[over.clone()], &bounds));
        assert!(!requires_split(&[under], &bounds));
        assert!(!requires_split(&[restricted, over], &bounds));
        assert!(!requires_split(&[], &bounds));
    }
}
