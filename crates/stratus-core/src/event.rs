//! Simulation events.

use std::cmp::Ordering;

use downcast_rs::{impl_downcast, Downcast};
use serde::ser::Serialize;

use crate::component::Id;

/// Unique event identifier, assigned in creation order.
pub type EventId = u64;

/// Trait for event payloads.
///
/// Any `'static` serializable type qualifies; serialization is used only for
/// logging undelivered and unhandled events.
pub trait EventData: Downcast + erased_serde::Serialize {}

impl_downcast!(EventData);

erased_serde::serialize_trait_object!(EventData);

impl<T: Serialize + 'static> EventData for T {}

/// An event scheduled for delivery at some simulation time.
pub struct Event {
    /// Identifier of the event.
    pub id: EventId,
    /// Delivery time.
    pub time: f64,
    /// Identifier of the component that emitted the event.
    pub src: Id,
    /// Identifier of the destination component.
    pub dst: Id,
    /// Event payload.
    pub data: Box<dyn EventData>,
}

impl Eq for Event {}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// Inverted ordering so that BinaryHeap pops the earliest event first.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other.time.total_cmp(&self.time).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
