//! Outcomes of a submission.

use exco_compliance::Violation;
use exco_core::OrderId;
use exco_state::Shipment;
use serde::Serialize;

/// Why (part of) a submission was refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// The offending container, or `None` for the shipment as a whole.
    pub container: Option<usize>,
    /// Everything wrong with it, in reporting order.
    pub violations: Vec<Violation>,
}

/// The decision on one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    /// Records were created, one per container, sharing `order_id`.
    Accepted {
        order_id: OrderId,
        shipments: Vec<Shipment>,
    },
    /// Nothing was recorded.
    Rejected(Vec<Rejection>),
}

impl Submission {
    /// Whether the shipments were recorded.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Created records; empty when rejected.
    pub fn shipments(&self) -> &[Shipment] {
        match self {
            Self::Accepted { shipments, .. } => shipments,
            Self::Rejected(_) => &[],
        }
    }

    /// Rejection reasons; empty when accepted.
    pub fn rejections(&self) -> &[Rejection] {
        match self {
            Self::Accepted { .. } => &[],
            Self::Rejected(rejections) => rejections,
        }
    }

    /// All violations across rejections, in order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.rejections().iter().flat_map(|r| r.violations.iter())
    }
}
