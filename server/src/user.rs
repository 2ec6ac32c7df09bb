use wirenet_shared::{BigMapKey, ParticipantId};

// UserKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct UserKey(u64);

impl BigMapKey for UserKey {
    fn to_u64(&self) -> u64 {
        self.0
    }

    fn from_u64(value: u64) -> Self {
        UserKey(value)
    }
}

/// A connected peer
#[derive(Clone, Debug)]
pub struct User {
    id: ParticipantId,
    operations_received: u64,
    snapshots_served: u64,
}

impl User {
    pub(crate) fn new(id: ParticipantId) -> Self {
        Self {
            id,
            operations_received: 0,
            snapshots_served: 0,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Operations received from this peer, applied or not
    pub fn operations_received(&self) -> u64 {
        self.operations_received
    }

    pub fn snapshots_served(&self) -> u64 {
        self.snapshots_served
    }

    pub(crate) fn mark_received(&mut self) {
        self.operations_received += 1;
    }

    pub(crate) fn mark_snapshot(&mut self) {
        self.snapshots_served += 1;
    }
}
