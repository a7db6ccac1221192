//! # Shipment Request
//!
//! The immutable input to compliance evaluation: who ships what, from where
//! to where, how heavy, how valuable, and by which carrier.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::identity::Country;
use crate::items::ItemSet;

/// Carrier service selected by the shipper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingService {
    #[serde(rename = "DHL")]
    Dhl,
    #[serde(rename = "FedEx")]
    FedEx,
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "USPS")]
    Usps,
}

impl fmt::Display for ShippingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dhl => "DHL",
            Self::FedEx => "FedEx",
            Self::Ups => "UPS",
            Self::Usps => "USPS",
        };
        f.write_str(s)
    }
}

/// A field the shipper must supply before a request can be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    SenderName,
    RecipientCountry,
    Items,
    DeclaredValue,
    Weight,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SenderName => "sender name",
            Self::RecipientCountry => "recipient country",
            Self::Items => "item type",
            Self::DeclaredValue => "declared value",
            Self::Weight => "weight",
        };
        f.write_str(s)
    }
}

/// A shipper's description of one parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Name of the shipping party.
    #[serde(default)]
    pub sender_name: String,
    /// Country the parcel ships from.
    pub sender_country: Country,
    /// Country the parcel ships to. A blank name reads as absent.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub recipient_country: Option<Country>,
    /// Goods categories in the parcel. Blank tags are dropped.
    #[serde(default, deserialize_with = "skip_blank_tags")]
    pub items: ItemSet,
    /// Declared customs value in dollars.
    #[serde(default)]
    pub declared_value: f64,
    /// Gross weight in kilograms.
    #[serde(default)]
    pub weight_kg: f64,
    /// Carrier service.
    pub service: ShippingService,
}

impl ShipmentRequest {
    /// Required fields that are absent or non-positive, in a fixed order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.sender_name.trim().is_empty() {
            missing.push(RequiredField::SenderName);
        }
        if self.recipient_country.is_none() {
            missing.push(RequiredField::RecipientCountry);
        }
        if self.items.is_empty() {
            missing.push(RequiredField::Items);
        }
        if !is_positive(self.declared_value) {
            missing.push(RequiredField::DeclaredValue);
        }
        if !is_positive(self.weight_kg) {
            missing.push(RequiredField::Weight);
        }
        missing
    }

    /// A copy of this request describing a single container of it.
    ///
    /// Sender, recipient, and service carry forward; items, value, and
    /// weight are the container's own.
    pub fn for_container(&self, items: ItemSet, declared_value: f64, weight_kg: f64) -> Self {
        Self {
            sender_name: self.sender_name.clone(),
            sender_country: self.sender_country.clone(),
            recipient_country: self.recipient_country.clone(),
            items,
            declared_value,
            weight_kg,
            service: self.service,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// Form layers send "" for an unset field; that is a missing field, not a
// malformed document.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Country>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(name) if !name.trim().is_empty() => {
            Country::new(name).map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn skip_blank_tags<'de, D>(deserializer: D) -> Result<ItemSet, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Vec::<String>::deserialize(deserializer)?;
    ItemSet::from_tags(tags.iter().filter(|tag| !tag.trim().is_empty()))
        .map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ShipmentRequest {
        ShipmentRequest {
            sender_name: "Asha".into(),
            sender_country: Country::new("India").unwrap(),
            recipient_country: Some(Country::new("UK").unwrap()),
            items: ItemSet::from_tags(["Books"]).unwrap(),
            declared_value: 40.0,
            weight_kg: 2.5,
            service: ShippingService::Dhl,
        }
    }

    #[test]
    fn valid_request_has_no_missing_fields() {
        assert!(valid().missing_fields().is_empty());
    }

    #[test]
    fn missing_fields_reported_in_order() {
        let mut req = valid();
        req.sender_name = "  ".into();
        req.recipient_country = None;
        req.items = ItemSet::new();
        req.declared_value = 0.0;
        req.weight_kg = f64::NAN;
        assert_eq!(
            req.missing_fields(),
            vec![
                RequiredField::SenderName,
                RequiredField::RecipientCountry,
                RequiredField::Items,
                RequiredField::DeclaredValue,
                RequiredField::Weight,
            ]
        );
    }

    #[test]
    fn negative_value_counts_as_missing() {
        let mut req = valid();
        req.declared_value = -5.0;
        assert_eq!(req.missing_fields(), vec![RequiredField::DeclaredValue]);
    }

    #[test]
    fn for_container_carries_parties_forward() {
        let req = valid();
        let part = req.for_container(ItemSet::from_tags(["Toys and Games"]).unwrap(), 10.0, 1.5);
        assert_eq!(part.sender_name, req.sender_name);
        assert_eq!(part.recipient_country, req.recipient_country);
        assert_eq!(part.service, req.service);
        assert_eq!(part.weight_kg, 1.5);
    }

    #[test]
    fn deserializes_with_absent_optional_fields() {
        let req: ShipmentRequest = serde_json::from_str(
            r#"{"sender_country": "USA", "service": "FedEx", "items": ["Books"]}"#,
        )
        .unwrap();
        assert_eq!(req.service, ShippingService::FedEx);
        assert!(req.recipient_country.is_none());
        assert_eq!(
            req.missing_fields(),
            vec![
                RequiredField::SenderName,
                RequiredField::RecipientCountry,
                RequiredField::DeclaredValue,
                RequiredField::Weight,
            ]
        );
    }

    #[test]
    fn blank_recipient_reads_as_missing() {
        for recipient in ["\"\"", "\"   \"", "null"] {
            let json = format!(
                r#"{{"sender_name": "Asha", "sender_country": "India",
                    "recipient_country": {recipient}, "items": ["Books"],
                    "declared_value": 40, "weight_kg": 2.5, "service": "DHL"}}"#
            );
            let req: ShipmentRequest = serde_json::from_str(&json).unwrap();
            assert!(req.recipient_country.is_none());
            assert_eq!(req.missing_fields(), vec![RequiredField::RecipientCountry]);
        }
    }

    #[test]
    fn recipient_is_trimmed() {
        let req: ShipmentRequest = serde_json::from_str(
            r#"{"sender_country": "USA", "service": "UPS", "recipient_country": " Japan "}"#,
        )
        .unwrap();
        assert_eq!(req.recipient_country, Some(Country::new("Japan").unwrap()));
    }

    #[test]
    fn blank_item_tags_are_dropped() {
        let req: ShipmentRequest = serde_json::from_str(
            r#"{"sender_country": "USA", "service": "UPS", "items": ["", " Books ", "  "]}"#,
        )
        .unwrap();
        assert_eq!(req.items, ItemSet::from_tags(["Books"]).unwrap());

        let req: ShipmentRequest = serde_json::from_str(
            r#"{"sender_country": "USA", "service": "UPS", "items": ["", " "]}"#,
        )
        .unwrap();
        assert!(req.items.is_empty());
        assert!(req.missing_fields().contains(&RequiredField::Items));
    }
}
