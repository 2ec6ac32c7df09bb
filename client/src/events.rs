use std::{mem, vec::IntoIter};

use wirenet_shared::{ApplyError, GraphOperation, Point};

use crate::WirenetClientError;

/// Everything that happened during one call to `Client::receive`
pub struct Events {
    operations: Vec<GraphOperation>,
    rejections: Vec<(GraphOperation, ApplyError)>,
    trip_wires: Vec<Point>,
    errors: Vec<WirenetClientError>,

    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            operations: Vec::new(),
            rejections: Vec::new(),
            trip_wires: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_operation(&mut self, operation: GraphOperation) {
        self.operations.push(operation);
        self.empty = false;
    }

    pub(crate) fn push_rejection(&mut self, operation: GraphOperation, error: ApplyError) {
        self.rejections.push((operation, error));
        self.empty = false;
    }

    pub(crate) fn push_trip_wire(&mut self, at: Point) {
        self.trip_wires.push(at);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: WirenetClientError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// OperationEvent: relayed by the authority and applied locally
pub struct OperationEvent;
impl Event for OperationEvent {
    type Iter = IntoIter<GraphOperation>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.operations);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.operations.is_empty()
    }
}

// RejectEvent: relayed by the authority but failed to apply locally
pub struct RejectEvent;
impl Event for RejectEvent {
    type Iter = IntoIter<(GraphOperation, ApplyError)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.rejections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.rejections.is_empty()
    }
}

// TripWireEvent
pub struct TripWireEvent;
impl Event for TripWireEvent {
    type Iter = IntoIter<Point>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.trip_wires);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.trip_wires.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<WirenetClientError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
