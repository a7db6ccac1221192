//! # Shipment Records
//!
//! A [`Shipment`] is the record of one physical container that passed
//! compliance. It copies the request's parties and service and the
//! container's own items, value, and weight, so it stays meaningful after
//! the request is gone.

use std::fmt;

use chrono::{DateTime, Utc};
use exco_core::{Country, ItemSet, OrderId, ShippingService, TrackingId};
use serde::{Deserialize, Serialize};

/// Where a shipment is in its journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Accepted and awaiting carrier pickup. Every new record starts here.
    Processing,
    /// Handed to the carrier.
    InTransit,
    /// Received by the recipient. Terminal state.
    Delivered,
    /// Refused downstream. Terminal state.
    Rejected,
}

impl ShipmentStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Processing => "Processing",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// The record of one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shared by every container of the same logical shipment.
    pub order_id: OrderId,
    /// Unique to this container.
    pub tracking_id: TrackingId,
    pub sender_name: String,
    pub sender_country: Country,
    pub recipient_country: Country,
    pub items: ItemSet,
    pub declared_value: f64,
    pub weight_kg: f64,
    pub service: ShippingService,
    pub status: ShipmentStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
