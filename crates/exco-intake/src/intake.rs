//! # Intake
//!
//! One [`Intake`] serves one caller: it holds the catalog, the factory, and
//! the tracking index, and decides each submission against them.
//!
//! ## Split Flow
//!
//! 1. Evaluate the whole request. Anything other than a weight violation
//!    rejects it outright; a split cannot fix a closed route.
//! 2. The weight must exceed the container maximum, otherwise there is
//!    nothing to split.
//! 3. Every container's items must come from the request.
//! 4. Plan container weights (see [`plan_containers`]).
//! 5. Evaluate each container as a request of its own. Different item
//!    subsets can trigger different violations, so every container is
//!    checked and all failures are reported together.
//! 6. Create every record under one order id. Records are staged on a copy
//!    of the index, so a failure part way leaves the index untouched.

use exco_compliance::{evaluate, Violation};
use exco_core::ShipmentRequest;
use exco_rules::RuleCatalog;
use exco_split::{plan_containers, ContainerAllocation, ContainerPlan};
use exco_state::{IdSource, ShipmentFactory, TrackingIndex};

use crate::error::{IntakeError, IntakeResult};
use crate::submission::{Rejection, Submission};

/// Decides submissions and records accepted shipments.
#[derive(Debug)]
pub struct Intake {
    catalog: RuleCatalog,
    factory: ShipmentFactory,
    index: TrackingIndex,
}

impl Intake {
    /// An intake with an empty tracking index.
    pub fn new(catalog: RuleCatalog, ids: impl IdSource + 'static) -> Self {
        Self {
            catalog,
            factory: ShipmentFactory::new(ids),
            index: TrackingIndex::new(),
        }
    }

    /// The catalog submissions are evaluated against.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Records created so far.
    pub fn index(&self) -> &TrackingIndex {
        &self.index
    }

    /// Give up the intake, keeping its records.
    pub fn into_index(self) -> TrackingIndex {
        self.index
    }

    /// Evaluate `request` and, if compliant, record it as one shipment.
    ///
    /// An overweight request is rejected with a weight violation; resubmit
    /// it through [`submit_split`](Self::submit_split).
    pub fn submit(&mut self, request: &ShipmentRequest) -> IntakeResult<Submission> {
        let violations = evaluate(request, &self.catalog);
        if !violations.is_empty() {
            return Ok(self.reject(vec![Rejection {
                container: None,
                violations,
            }]));
        }

        let shipment = self.factory.create_shipment(
            &mut self.index,
            request,
            &ContainerPlan::whole(request),
            None,
        )?;
        let order_id = shipment.order_id;
        tracing::info!(
            %order_id,
            tracking_id = %shipment.tracking_id,
            recipient = %shipment.recipient_country,
            "shipment accepted"
        );
        Ok(Submission::Accepted {
            order_id,
            shipments: vec![shipment],
        })
    }

    /// Split an overweight `request` across `allocations` and record every
    /// container under one order id.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::SplitNotRequired`] if the request fits one container.
    /// - [`IntakeError::UnknownContainerItem`] if a container lists an item
    ///   the request does not.
    /// - [`IntakeError::Split`] if the weights cannot be planned.
    /// - [`IntakeError::State`] if a record cannot be created. No container
    ///   of the group is recorded in that case.
    pub fn submit_split(
        &mut self,
        request: &ShipmentRequest,
        allocations: &[ContainerAllocation],
    ) -> IntakeResult<Submission> {
        let violations = evaluate(request, &self.catalog);
        if violations
            .iter()
            .any(|v| !matches!(v, Violation::WeightExceeded { .. }))
        {
            return Ok(self.reject(vec![Rejection {
                container: None,
                violations,
            }]));
        }

        let bounds = self.catalog.bounds();
        if !bounds.exceeds_max(request.weight_kg) {
            return Err(IntakeError::SplitNotRequired {
                weight_kg: request.weight_kg,
                max_kg: bounds.max_kg(),
            });
        }

        for (container, allocation) in allocations.iter().enumerate() {
            if let Some(item) = allocation
                .items
                .iter()
                .find(|item| !request.items.contains(item))
            {
                return Err(IntakeError::UnknownContainerItem {
                    container,
                    item: item.clone(),
                });
            }
        }

        let plans = plan_containers(request.weight_kg, allocations, &bounds)?;

        let rejections: Vec<Rejection> = plans
            .iter()
            .filter_map(|plan| {
                let container =
                    request.for_container(plan.items.clone(), plan.declared_value, plan.weight_kg);
                let violations = evaluate(&container, &self.catalog);
                (!violations.is_empty()).then(|| Rejection {
                    container: Some(plan.index),
                    violations,
                })
            })
            .collect();
        if !rejections.is_empty() {
            return Ok(self.reject(rejections));
        }

        let mut staged = self.index.clone();
        let order_id = self.factory.new_order_id(&staged)?;
        let mut shipments = Vec::with_capacity(plans.len());
        for plan in &plans {
            shipments.push(self.factory.create_shipment(
                &mut staged,
                request,
                plan,
                Some(order_id),
            )?);
        }
        self.index = staged;
        tracing::info!(
            %order_id,
            containers = shipments.len(),
            weight_kg = request.weight_kg,
            "split shipment accepted"
        );
        Ok(Submission::Accepted {
            order_id,
            shipments,
        })
    }

    fn reject(&self, rejections: Vec<Rejection>) -> Submission {
        for rejection in &rejections {
            tracing::warn!(
                container = ?rejection.container,
                violations = rejection.violations.len(),
                first = %rejection.violations.first().map(Violation::detail).unwrap_or_default(),
                "submission rejected"
            );
        }
        Submission::Rejected(rejections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exco_compliance::ViolationKind;
    use exco_core::{Country, ItemSet, OrderId, ShippingService, TrackingId};
    use exco_split::SplitError;
    use exco_state::{RandomIds, ShipmentStatus, StateError, MAX_ID_ATTEMPTS};

    fn intake() -> Intake {
        Intake::new(RuleCatalog::builtin().unwrap(), RandomIds::seeded(42))
    }

    fn request(recipient: &str, items: &[&str], weight_kg: f64) -> ShipmentRequest {
        ShipmentRequest {
            sender_name: "Priya".into(),
            sender_country: Country::new("UK").unwrap(),
            recipient_country: Some(Country::new(recipient).unwrap()),
            items: ItemSet::from_tags(items).unwrap(),
            declared_value: 300.0,
            weight_kg,
            service: ShippingService::Dhl,
        }
    }

    fn alloc(value: f64, items: &[&str]) -> ContainerAllocation {
        ContainerAllocation {
            weight_kg: None,
            declared_value: value,
            items: ItemSet::from_tags(items).unwrap(),
        }
    }

    #[test]
    fn compliant_request_recorded() {
        let mut intake = intake();
        let submission = intake.submit(&request("Japan", &["Books"], 4.0)).unwrap();
        assert!(submission.is_accepted());
        assert_eq!(submission.shipments()[0].status, ShipmentStatus::Processing);
        assert_eq!(intake.index().len(), 1);
    }

    #[test]
    fn non_compliant_request_not_recorded() {
        let mut intake = intake();
        let submission = intake
            .submit(&request("UAE", &["Alcohol"], 4.0))
            .unwrap();
        assert!(!submission.is_accepted());
        assert_eq!(submission.rejections()[0].container, None);
        assert!(intake.index().is_empty());
    }

    #[test]
    fn overweight_request_rejected_unsplit() {
        let mut intake = intake();
        let submission = intake.submit(&request("Japan", &["Books"], 45.0)).unwrap();
        let kinds: Vec<_> = submission.violations().map(Violation::kind).collect();
        assert_eq!(kinds, vec![ViolationKind::WeightExceeded]);
    }

    #[test]
    fn split_records_each_container_under_one_order() {
        let mut intake = intake();
        let req = request("Japan", &["Books", "Clothing"], 45.0);
        let submission = intake
            .submit_split(&req, &[alloc(200.0, &["Books"]), alloc(100.0, &["Clothing"])])
            .unwrap();
        let Submission::Accepted { order_id, shipments } = &submission else {
            panic!("expected acceptance, got {submission:?}");
        };
        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[0].weight_kg, 30.0);
        assert_eq!(shipments[1].weight_kg, 15.0);
        assert!(shipments.iter().all(|s| s.order_id == *order_id));
        assert_ne!(shipments[0].tracking_id, shipments[1].tracking_id);
        assert_eq!(intake.index().find_by_order(order_id).len(), 2);
    }

    #[test]
    fn split_of_blocked_route_rejected_before_planning() {
        let mut intake = intake();
        let mut req = request("Cuba", &["Books"], 45.0);
        req.sender_country = Country::new("USA").unwrap();
        let submission = intake
            .submit_split(&req, &[alloc(1.0, &["Books"]), alloc(1.0, &["Books"])])
            .unwrap();
        let kinds: Vec<_> = submission.violations().map(Violation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::ConflictingDestination,
                ViolationKind::WeightExceeded
            ]
        );
        assert!(intake.index().is_empty());
    }

    #[test]
    fn split_not_required_within_limit() {
        let mut intake = intake();
        let err = intake
            .submit_split(
                &request("Japan", &["Books"], 20.0),
                &[alloc(1.0, &["Books"]), alloc(1.0, &["Books"])],
            )
            .unwrap_err();
        assert!(matches!(err, IntakeError::SplitNotRequired { .. }));
    }

    #[test]
    fn container_items_must_come_from_request() {
        let mut intake = intake();
        let err = intake
            .submit_split(
                &request("Japan", &["Books"], 45.0),
                &[alloc(1.0, &["Books"]), alloc(1.0, &["Knives"])],
            )
            .unwrap_err();
        assert_eq!(
            err,
            IntakeError::UnknownContainerItem {
                container: 1,
                item: exco_core::ItemTag::new("Knives").unwrap(),
            }
        );
    }

    #[test]
    fn insufficient_containers_surface_as_split_error() {
        let mut intake = intake();
        let err = intake
            .submit_split(
                &request("Japan", &["Books"], 100.0),
                &[alloc(1.0, &["Books"]), alloc(1.0, &["Books"])],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IntakeError::Split(SplitError::InsufficientContainers { minimum: 4, .. })
        ));
    }

    #[test]
    fn containers_rejected_individually() {
        let mut intake = intake();
        let req = request("Japan", &["Books", "Clothing"], 45.0);
        // Second container has no declared value.
        let submission = intake
            .submit_split(&req, &[alloc(10.0, &["Books"]), alloc(0.0, &["Clothing"])])
            .unwrap();
        let rejections = submission.rejections();
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].container, Some(1));
        assert_eq!(rejections[0].violations[0].kind(), ViolationKind::MissingField);
        assert!(intake.index().is_empty());
    }

    /// Fresh order ids, but the same tracking id every time.
    struct StuckTracking {
        next_order: u32,
    }

    impl IdSource for StuckTracking {
        fn next_order_id(&mut self) -> OrderId {
            self.next_order += 1;
            OrderId::wrapping(self.next_order)
        }

        fn next_tracking_id(&mut self) -> TrackingId {
            TrackingId::wrapping(5)
        }
    }

    #[test]
    fn failed_split_records_no_container() {
        let mut intake = Intake::new(
            RuleCatalog::builtin().unwrap(),
            StuckTracking { next_order: 0 },
        );
        let req = request("Japan", &["Books", "Clothing"], 45.0);
        // The first container takes the only tracking id; the second exhausts retries.
        let err = intake
            .submit_split(&req, &[alloc(200.0, &["Books"]), alloc(100.0, &["Clothing"])])
            .unwrap_err();
        assert!(matches!(
            err,
            IntakeError::State(StateError::IdSpaceExhausted {
                kind: "tracking id",
                attempts: MAX_ID_ATTEMPTS,
            })
        ));
        assert!(intake.index().is_empty());

        // The index is still usable: the lone tracking id is free again.
        let submission = intake.submit(&request("Japan", &["Books"], 4.0)).unwrap();
        assert!(submission.is_accepted());
        assert_eq!(intake.index().len(), 1);
    }
}
