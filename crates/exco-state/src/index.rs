//! # Tracking Index
//!
//! In-memory map from tracking id to [`Shipment`], with a secondary index by
//! order id. Records are kept in insertion order.
//!
//! The index is a plain owned value: single-threaded callers hold it by
//! `&mut`. [`SharedTrackingIndex`] wraps it in a `parking_lot::Mutex` for
//! callers on several threads; id generation and insertion are a
//! check-then-act sequence and must run inside one [`SharedTrackingIndex::with`]
//! call.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use exco_core::{OrderId, TrackingId};
use parking_lot::Mutex;

use crate::error::StateError;
use crate::shipment::{Shipment, ShipmentStatus};

/// Shipment records keyed by tracking id.
#[derive(Debug, Clone, Default)]
pub struct TrackingIndex {
    shipments: Vec<Shipment>,
    by_tracking: HashMap<TrackingId, usize>,
    by_order: BTreeMap<OrderId, Vec<usize>>,
}

impl TrackingIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record.
    ///
    /// # Errors
    ///
    /// [`StateError::DuplicateTrackingId`] if the tracking id is taken; the
    /// index is unchanged.
    pub fn insert(&mut self, shipment: Shipment) -> Result<(), StateError> {
        if self.by_tracking.contains_key(&shipment.tracking_id) {
            return Err(StateError::DuplicateTrackingId {
                tracking_id: shipment.tracking_id,
            });
        }
        let position = self.shipments.len();
        self.by_tracking.insert(shipment.tracking_id, position);
        self.by_order
            .entry(shipment.order_id)
            .or_default()
            .push(position);
        self.shipments.push(shipment);
        Ok(())
    }

    /// Records of an order, in insertion order.
    ///
    /// `order_id` is trimmed and matched exactly; text that is not a
    /// well-formed order id matches nothing.
    pub fn find_by_order_id(&self, order_id: &str) -> Vec<&Shipment> {
        match order_id.trim().parse::<OrderId>() {
            Ok(id) => self.find_by_order(&id),
            Err(_) => Vec::new(),
        }
    }

    /// Records of an order, in insertion order.
    pub fn find_by_order(&self, order_id: &OrderId) -> Vec<&Shipment> {
        self.by_order
            .get(order_id)
            .map(|positions| positions.iter().map(|&p| &self.shipments[p]).collect())
            .unwrap_or_default()
    }

    /// The record with this tracking id, after trimming.
    pub fn find_by_tracking_id(&self, tracking_id: &str) -> Option<&Shipment> {
        let id = tracking_id.trim().parse::<TrackingId>().ok()?;
        self.get(&id)
    }

    /// The record with this tracking id.
    pub fn get(&self, tracking_id: &TrackingId) -> Option<&Shipment> {
        self.by_tracking
            .get(tracking_id)
            .map(|&position| &self.shipments[position])
    }

    /// Status of the record with this tracking id.
    pub fn status_of(&self, tracking_id: &TrackingId) -> Option<ShipmentStatus> {
        self.get(tracking_id).map(|s| s.status)
    }

    /// Whether a tracking id is taken.
    pub fn contains_tracking(&self, tracking_id: &TrackingId) -> bool {
        self.by_tracking.contains_key(tracking_id)
    }

    /// Whether any record belongs to this order.
    pub fn contains_order(&self, order_id: &OrderId) -> bool {
        self.by_order.contains_key(order_id)
    }

    /// Known order ids, sorted.
    pub fn order_ids(&self) -> impl Iterator<Item = &OrderId> {
        self.by_order.keys()
    }

    /// All records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shipment> {
        self.shipments.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }
}

/// A [`TrackingIndex`] shared between threads.
///
/// Cloning shares the same index. `parking_lot::Mutex` does not poison, so
/// a panicking caller does not lock everyone else out.
#[derive(Debug, Clone, Default)]
pub struct SharedTrackingIndex {
    inner: Arc<Mutex<TrackingIndex>>,
}

impl SharedTrackingIndex {
    /// Share an existing index.
    pub fn new(index: TrackingIndex) -> Self {
        Self {
            inner: Arc::new(Mutex::new(index)),
        }
    }

    /// Run `f` with exclusive access to the index.
    pub fn with<R>(&self, f: impl FnOnce(&mut TrackingIndex) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Records of an order, cloned out of the lock.
    pub fn find_by_order_id(&self, order_id: &str) -> Vec<Shipment> {
        self.inner
            .lock()
            .find_by_order_id(order_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The record with this tracking id, cloned out of the lock.
    pub fn find_by_tracking_id(&self, tracking_id: &str) -> Option<Shipment> {
        self.inner.lock().find_by_tracking_id(tracking_id).cloned()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// A point-in-time copy of the index.
    pub fn snapshot(&self) -> TrackingIndex {
        self.inner.lock().clone()
    }
}
