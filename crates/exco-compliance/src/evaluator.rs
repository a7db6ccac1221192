//! # Compliance Evaluator
//!
//! Runs every catalog check against a request and collects the violations.
//!
//! ## Evaluation Logic
//!
//! 1. **MissingField**: one violation naming every absent field.
//! 2. **ConflictingDestination**: the origin forbids the recipient country.
//! 3. **RestrictedItem**: one violation per requested item the recipient
//!    restricts, in the catalog's sorted order.
//! 4. **ItemConflict**: one violation per catalog conflict set the request
//!    fully contains, in declaration order. Skipped for single-item requests.
//! 5. **WeightExceeded**: weight outside the catalog's container bounds.
//!    Skipped when weight is already reported missing.
//!
//! No check short-circuits another.

use exco_core::{RequiredField, ShipmentRequest, WeightBounds};
use exco_rules::RuleCatalog;

use crate::violation::{requires_split, Violation};

type Check = fn(&ShipmentRequest, &RuleCatalog, &mut Vec<Violation>);

/// Checks in reporting order.
const CHECKS: [Check; 5] = [
    check_missing_fields,
    check_conflicting_destination,
    check_restricted_items,
    check_item_conflicts,
    check_weight_bounds,
];

/// Evaluate `request` against `catalog`. An empty result means compliant.
pub fn evaluate(request: &ShipmentRequest, catalog: &RuleCatalog) -> Vec<Violation> {
    let mut violations = Vec::new();
    for check in CHECKS {
        check(request, catalog, &mut violations);
    }
    tracing::debug!(
        sender = %request.sender_country,
        items = %request.items,
        violations = violations.len(),
        "evaluated shipment request"
    );
    violations
}

/// Violations together with the bounds they were judged against.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    violations: Vec<Violation>,
    bounds: WeightBounds,
}

impl Evaluation {
    /// Evaluate `request` against `catalog`.
    pub fn of(request: &ShipmentRequest, catalog: &RuleCatalog) -> Self {
        Self {
            violations: evaluate(request, catalog),
            bounds: catalog.bounds(),
        }
    }

    /// No violations at all.
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether splitting into containers would make the request compliant.
    pub fn requires_split(&self) -> bool {
        requires_split(&self.violations, &self.bounds)
    }

    /// Violations in reporting order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Take the violations, dropping the bounds.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

fn check_missing_fields(request: &ShipmentRequest, _: &RuleCatalog, out: &mut Vec<Violation>) {
    let fields = request.missing_fields();
    if !fields.is_empty() {
        out.push(Violation::MissingField { fields });
    }
}

fn check_conflicting_destination(
    request: &ShipmentRequest,
    catalog: &RuleCatalog,
    out: &mut Vec<Violation>,
) {
    let Some(recipient) = &request.recipient_country else {
        return;
    };
    if catalog.is_conflicting_route(&request.sender_country, recipient) {
        tracing::debug!(sender = %request.sender_country, %recipient, "conflicting route");
        out.push(Violation::ConflictingDestination {
            sender: request.sender_country.clone(),
            recipient: recipient.clone(),
        });
    }
}

fn check_restricted_items(
    request: &ShipmentRequest,
    catalog: &RuleCatalog,
    out: &mut Vec<Violation>,
) {
    let Some(recipient) = &request.recipient_country else {
        return;
    };
    let Some(restricted) = catalog.restricted_in(recipient) else {
        return;
    };
    for item in restricted.iter().filter(|item| request.items.contains(item)) {
        tracing::debug!(%item, %recipient, "restricted item");
        out.push(Violation::RestrictedItem {
            item: item.clone(),
            country: recipient.clone(),
        });
    }
}

fn check_item_conflicts(request: &ShipmentRequest, catalog: &RuleCatalog, out: &mut Vec<Violation>) {
    if request.items.len() < 2 {
        return;
    }
    for conflict in catalog.item_conflicts() {
        if request.items.is_superset(conflict) {
            tracing::debug!(items = %conflict, "item conflict");
            out.push(Violation::ItemConflict {
                items: conflict.clone(),
            });
        }
    }
}

fn check_weight_bounds(request: &ShipmentRequest, catalog: &RuleCatalog, out: &mut Vec<Violation>) {
    if request.missing_fields().contains(&RequiredField::Weight) {
        return;
    }
    let bounds = catalog.bounds();
    if !bounds.contains(request.weight_kg) {
        out.push(Violation::WeightExceeded {
            weight_kg: request.weight_kg,
            min_kg: bounds.min_kg(),
            max_kg: bounds.max_kg(),
        });
    }
}
