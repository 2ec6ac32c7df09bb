use std::{mem, vec::IntoIter};

use wirenet_shared::{ApplyError, GraphOperation, ParticipantId, Point};

use crate::WirenetServerError;

/// Everything that happened during one call to `Server::receive`
pub struct Events {
    connections: Vec<ParticipantId>,
    disconnections: Vec<ParticipantId>,
    operations: Vec<(ParticipantId, GraphOperation)>,
    rejections: Vec<(ParticipantId, GraphOperation, ApplyError)>,
    snapshots: Vec<(ParticipantId, usize)>,
    trip_wires: Vec<(ParticipantId, Point)>,
    errors: Vec<WirenetServerError>,

    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            disconnections: Vec::new(),
            operations: Vec::new(),
            rejections: Vec::new(),
            snapshots: Vec::new(),
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

    pub(crate) fn push_connection(&mut self, id: ParticipantId) {
        self.connections.push(id);
        self.empty = false;
    }

    pub(crate) fn push_disconnection(&mut self, id: ParticipantId) {
        self.disconnections.push(id);
        self.empty = false;
    }

    pub(crate) fn push_operation(&mut self, from: ParticipantId, operation: GraphOperation) {
        self.operations.push((from, operation));
        self.empty = false;
    }

    pub(crate) fn push_rejection(
        &mut self,
        from: ParticipantId,
        operation: GraphOperation,
        error: ApplyError,
    ) {
        self.rejections.push((from, operation, error));
        self.empty = false;
    }

    pub(crate) fn push_snapshot(&mut self, requester: ParticipantId, operation_count: usize) {
        self.snapshots.push((requester, operation_count));
        self.empty = false;
    }

    pub(crate) fn push_trip_wire(&mut self, from: ParticipantId, at: Point) {
        self.trip_wires.push((from, at));
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: WirenetServerError) {
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

// ConnectEvent
pub struct ConnectEvent;
impl Event for ConnectEvent {
    type Iter = IntoIter<ParticipantId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.connections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.connections.is_empty()
    }
}

// DisconnectEvent
pub struct DisconnectEvent;
impl Event for DisconnectEvent {
    type Iter = IntoIter<ParticipantId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.disconnections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.disconnections.is_empty()
    }
}

// OperationEvent: applied and relayed
pub struct OperationEvent;
impl Event for OperationEvent {
    type Iter = IntoIter<(ParticipantId, GraphOperation)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.operations);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.operations.is_empty()
    }
}

// RejectEvent: dropped at the authority, never relayed
pub struct RejectEvent;
impl Event for RejectEvent {
    type Iter = IntoIter<(ParticipantId, GraphOperation, ApplyError)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.rejections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.rejections.is_empty()
    }
}

// SnapshotEvent: requester and number of operations sent
pub struct SnapshotEvent;
impl Event for SnapshotEvent {
    type Iter = IntoIter<(ParticipantId, usize)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.snapshots);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.snapshots.is_empty()
    }
}

// TripWireEvent
pub struct TripWireEvent;
impl Event for TripWireEvent {
    type Iter = IntoIter<(ParticipantId, Point)>;

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
    type Iter = IntoIter<WirenetServerError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
