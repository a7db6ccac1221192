//! # Shipment Factory
//!
//! Turns a compliant request and its container plan into a [`Shipment`]
//! record and indexes it.
//!
//! Tracking ids must be unique within the index. A proposed id that is
//! already taken is discarded and another is drawn, up to
//! [`MAX_ID_ATTEMPTS`] times. Collisions are routine and never surface to
//! the caller; running out of attempts means the id space is effectively
//! full and is reported as [`StateError::IdSpaceExhausted`].

use chrono::Utc;
use exco_core::{OrderId, ShipmentRequest, TrackingId};
use exco_split::ContainerPlan;

use crate::error::StateError;
use crate::ids::{IdSource, RandomIds};
use crate::index::{SharedTrackingIndex, TrackingIndex};
use crate::shipment::{Shipment, ShipmentStatus};

/// Proposals drawn before giving up on finding an unused id.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// Builds and indexes shipment records.
pub struct ShipmentFactory {
    ids: Box<dyn IdSource>,
}

impl std::fmt::Debug for ShipmentFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipmentFactory").finish_non_exhaustive()
    }
}

impl Default for ShipmentFactory {
    fn default() -> Self {
        Self::new(RandomIds::new())
    }
}

impl ShipmentFactory {
    /// A factory drawing ids from `ids`.
    pub fn new(ids: impl IdSource + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    /// An order id not used by any record in `index`.
    ///
    /// Call once per logical shipment and pass the result to every
    /// [`create_shipment`](Self::create_shipment) call for its containers.
    pub fn new_order_id(&mut self, index: &TrackingIndex) -> Result<OrderId, StateError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_order_id();
            if !index.contains_order(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(order_id = %candidate, attempt, "order id collision, retrying");
        }
        Err(StateError::IdSpaceExhausted {
            kind: "order id",
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn new_tracking_id(&mut self, index: &TrackingIndex) -> Result<TrackingId, StateError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_tracking_id();
            if !index.contains_tracking(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(tracking_id = %candidate, attempt, "tracking id collision, retrying");
        }
        Err(StateError::IdSpaceExhausted {
            kind: "tracking id",
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Create the record for one container of `request` and insert it.
    ///
    /// Parties and service come from `request`; items, value, and weight
    /// from `plan`. Without `order_id` a fresh one is generated, which is
    /// right only for single-container shipments.
    ///
    /// # Errors
    ///
    /// - [`StateError::MissingRecipient`] if the request has no recipient.
    /// - [`StateError::IdSpaceExhausted`] if no unused id could be found.
    pub fn create_shipment(
        &mut self,
        index: &mut TrackingIndex,
        request: &ShipmentRequest,
        plan: &ContainerPlan,
        order_id: Option<OrderId>,
    ) -> Result<Shipment, StateError> {
        let recipient_country = request
            .recipient_country
            .clone()
            .ok_or(StateError::MissingRecipient)?;
        let order_id = match order_id {
            Some(id) => id,
            None => self.new_order_id(index)?,
        };
        let tracking_id = self.new_tracking_id(index)?;

        let shipment = Shipment {
            order_id,
            tracking_id,
            sender_name: request.sender_name.clone(),
            sender_country: request.sender_country.clone(),
            recipient_country,
            items: plan.items.clone(),
            declared_value: plan.declared_value,
            weight_kg: plan.weight_kg,
            service: request.service,
            status: ShipmentStatus::Processing,
            created_at: Utc::now(),
        };
        index.insert(shipment.clone())?;

        tracing::debug!(
            %order_id,
            %tracking_id,
            container = plan.index,
            weight_kg = plan.weight_kg,
            "created shipment"
        );
        Ok(shipment)
    }

    /// [`create_shipment`](Self::create_shipment) against a shared index.
    ///
    /// Id selection and insertion happen under one lock, so concurrent
    /// factories never hand out the same tracking id.
    pub fn create_shared(
        &mut self,
        index: &SharedTrackingIndex,
        request: &ShipmentRequest,
        plan: &ContainerPlan,
        order_id: Option<OrderId>,
    ) -> Result<Shipment, StateError> {
        index.with(|index| self.create_shipment(index, request, plan, order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};
    use std::thread;

    use exco_core::{Country, ItemSet, ShippingService};

    /// Replays fixed id bodies, then repeats the last one.
    struct ScriptedIds {
        orders: VecDeque<u32>,
        tracking: VecDeque<u32>,
    }

    impl ScriptedIds {
        fn new(orders: &[u32], tracking: &[u32]) -> Self {
            Self {
                orders: orders.iter().copied().collect(),
                tracking: tracking.iter().copied().collect(),
            }
        }

        fn draw(queue: &mut VecDeque<u32>) -> u32 {
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                *queue.front().unwrap()
            }
        }
    }

    impl IdSource for ScriptedIds {
        fn next_order_id(&mut self) -> OrderId {
            OrderId::wrapping(Self::draw(&mut self.orders))
        }

        fn next_tracking_id(&mut self) -> TrackingId {
            TrackingId::wrapping(Self::draw(&mut self.tracking))
        }
    }

    fn request() -> ShipmentRequest {
        ShipmentRequest {
            sender_name: "Amara".into(),
            sender_country: Country::new("UK").unwrap(),
            recipient_country: Some(Country::new("Japan").unwrap()),
            items: ItemSet::from_tags(["Books", "Clothing"]).unwrap(),
            declared_value: 80.0,
            weight_kg: 6.0,
            service: ShippingService::FedEx,
        }
    }

    #[test]
    fn creates_processing_record_and_indexes_it() {
        let mut factory = ShipmentFactory::new(RandomIds::seeded(3));
        let mut index = TrackingIndex::new();
        let req = request();
        let shipment = factory
            .create_shipment(&mut index, &req, &ContainerPlan::whole(&req), None)
            .unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Processing);
        assert_eq!(shipment.recipient_country.as_str(), "Japan");
        assert_eq!(shipment.items, req.items);
        assert_eq!(
            index.find_by_tracking_id(&shipment.tracking_id.to_string()),
            Some(&shipment)
        );
    }

    #[test]
    fn colliding_tracking_ids_are_retried() {
        // Tracking body 5 is drawn twice before 6.
        let mut factory = ShipmentFactory::new(ScriptedIds::new(&[1, 2], &[5, 5, 5, 6]));
        let mut index = TrackingIndex::new();
        let req = request();
        let plan = ContainerPlan::whole(&req);
        let first = factory.create_shipment(&mut index, &req, &plan, None).unwrap();
        let second = factory.create_shipment(&mut index, &req, &plan, None).unwrap();
        assert_eq!(first.tracking_id, TrackingId::wrapping(5));
        assert_eq!(second.tracking_id, TrackingId::wrapping(6));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn exhausted_id_space_reported() {
        let mut factory = ShipmentFactory::new(ScriptedIds::new(&[1, 2], &[9]));
        let mut index = TrackingIndex::new();
        let req = request();
        let plan = ContainerPlan::whole(&req);
        factory.create_shipment(&mut index, &req, &plan, None).unwrap();
        let err = factory
            .create_shipment(&mut index, &req, &plan, None)
            .unwrap_err();
        assert_eq!(
            err,
            StateError::IdSpaceExhausted {
                kind: "tracking id",
                attempts: MAX_ID_ATTEMPTS,
            }
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn fresh_order_ids_skip_existing_orders() {
        let mut factory = ShipmentFactory::new(ScriptedIds::new(&[4, 4, 7], &[1, 2]));
        let mut index = TrackingIndex::new();
        let req = request();
        let plan = ContainerPlan::whole(&req);
        let a = factory.create_shipment(&mut index, &req, &plan, None).unwrap();
        let b = factory.create_shipment(&mut index, &req, &plan, None).unwrap();
        assert_eq!(a.order_id, OrderId::wrapping(4));
        assert_eq!(b.order_id, OrderId::wrapping(7));
    }

    #[test]
    fn supplied_order_id_is_shared() {
        let mut factory = ShipmentFactory::new(RandomIds::seeded(11));
        let mut index = TrackingIndex::new();
        let req = request();
        let order_id = factory.new_order_id(&index).unwrap();
        let plan = ContainerPlan::whole(&req);
        for _ in 0..3 {
            factory
                .create_shipment(&mut index, &req, &plan, Some(order_id))
                .unwrap();
        }
        let group = index.find_by_order(&order_id);
        assert_eq!(group.len(), 3);
        let tracking: HashSet<_> = group.iter().map(|s| s.tracking_id).collect();
        assert_eq!(tracking.len(), 3);
    }

    #[test]
    fn missing_recipient_rejected() {
        let mut factory = ShipmentFactory::default();
        let mut index = TrackingIndex::new();
        let mut req = request();
        req.recipient_country = None;
        let err = factory
            .create_shipment(&mut index, &req, &ContainerPlan::whole(&req), None)
            .unwrap_err();
        assert_eq!(err, StateError::MissingRecipient);
        assert!(index.is_empty());
    }

    #[test]
    fn concurrent_factories_never_share_tracking_ids() {
        // Identical seeds propose identical ids; only the lock keeps them
        // unique. Other threads' records bound the retries a thread needs
        // (3 * 15 < MAX_ID_ATTEMPTS).
        let shared = SharedTrackingIndex::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut factory = ShipmentFactory::new(RandomIds::seeded(99));
                    let req = request();
                    let plan = ContainerPlan::whole(&req);
                    for _ in 0..15 {
                        factory.create_shared(&shared, &req, &plan, None).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.len(), 60);
        let unique: HashSet<_> = snapshot.iter().map(|s| s.tracking_id).collect();
        assert_eq!(unique.len(), 60);
    }
}
