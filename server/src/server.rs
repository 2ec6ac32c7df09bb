use std::{collections::HashMap, mem};

use log::{info, warn};

use wirenet_shared::{
    ApplyError, BigMap, DeviceRegistry, GraphConfig, GraphOperation, GraphStore,
    ParticipantId, Point, Replica, WorldQuery,
};

use crate::{
    events::Events,
    transport::{PacketReceiver, PacketSender},
    user::{User, UserKey},
    ServerConfig, WirenetServerError,
};

/// The authority of a session.
///
/// Every operation received from a peer is applied to the authority's own
/// graph first. Only operations that apply cleanly are relayed, to every
/// connected peer including the one that sent it, so each peer mirrors the
/// authority's apply order, which is the order of record.
pub struct Server {
    config: ServerConfig,
    replica: Replica,
    // Transport
    io: Option<(Box<dyn PacketSender>, Box<dyn PacketReceiver>)>,
    // Users
    users: BigMap<UserKey, User>,
    user_ids: HashMap<ParticipantId, UserKey>,
    // Events
    incoming_events: Events,
}

impl Server {
    /// Create a new Server
    pub fn new(config: ServerConfig, registry: DeviceRegistry, graph_config: GraphConfig) -> Self {
        Self::from_replica(config, Replica::new(registry, graph_config))
    }

    /// Create a new Server whose graph consults `world` for placement and
    /// trip wires
    pub fn with_world<W: WorldQuery + 'static>(
        config: ServerConfig,
        registry: DeviceRegistry,
        graph_config: GraphConfig,
        world: W,
    ) -> Self {
        Self::from_replica(config, Replica::with_world(registry, graph_config, world))
    }

    fn from_replica(config: ServerConfig, replica: Replica) -> Self {
        Self {
            config,
            replica,
            io: None,
            users: BigMap::new(),
            user_ids: HashMap::new(),
            incoming_events: Events::new(),
        }
    }

    /// Starts sending and receiving through the given transport
    pub fn listen(&mut self, sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) {
        self.io = Some((sender, receiver));
    }

    pub fn is_listening(&self) -> bool {
        self.io.is_some()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn graph(&self) -> &GraphStore {
        self.replica.graph()
    }

    pub fn graph_mut(&mut self) -> &mut GraphStore {
        self.replica.graph_mut()
    }

    pub fn replica(&self) -> &Replica {
        &self.replica
    }

    /// Must be called regularly, receives and handles every pending packet
    pub fn receive(&mut self) -> Events {
        self.receive_packets();

        // return all received events and reset the buffer
        mem::replace(&mut self.incoming_events, Events::new())
    }

    // Users

    /// Registers a peer so it receives relays. Connecting an id twice keeps
    /// the existing user.
    pub fn user_connect(&mut self, id: ParticipantId) -> UserKey {
        if let Some(user_key) = self.user_ids.get(&id) {
            warn!("user {} is already connected", id);
            return *user_key;
        }
        info!("adding user {}", id);
        let user_key = self.users.insert(User::new(id));
        self.user_ids.insert(id, user_key);
        self.incoming_events.push_connection(id);
        user_key
    }

    pub fn user_disconnect(&mut self, id: &ParticipantId) -> Option<User> {
        let user_key = self.user_ids.remove(id)?;
        let user = self.users.remove(&user_key)?;
        info!("deleting user {}", id);
        self.incoming_events.push_disconnection(*id);
        Some(user)
    }

    pub fn user_exists(&self, id: &ParticipantId) -> bool {
        self.user_ids.contains_key(id)
    }

    pub fn user(&self, id: &ParticipantId) -> Option<&User> {
        let user_key = self.user_ids.get(id)?;
        self.users.get(user_key)
    }

    /// Ids of all connected users, in connection order
    pub fn user_ids(&self) -> Vec<ParticipantId> {
        self.users.iter().map(|(_, user)| user.id()).collect()
    }

    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    // Authority intents

    /// Places a device with its default settings and broadcasts it
    pub fn place_device(&mut self, kind: &str, x: i32, y: i32) -> Result<(), ApplyError> {
        let device = self.replica.registry().create(kind)?;
        let settings = device
            .settings()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        self.commit(GraphOperation::Place {
            kind: kind.to_string(),
            anchor: Point::new(x, y),
            settings,
        })
    }

    pub fn remove_device(&mut self, x: i32, y: i32) -> Result<(), ApplyError> {
        self.commit(GraphOperation::Remove {
            at: Point::new(x, y),
        })
    }

    /// Connects the pins at `source` and `destination` with a wire drawn
    /// through `points`
    pub fn connect_pins(
        &mut self,
        source: Point,
        destination: Point,
        points: Vec<Point>,
    ) -> Result<(), ApplyError> {
        self.commit(GraphOperation::Connect {
            source,
            destination,
            points,
        })
    }

    pub fn disconnect_pin(&mut self, x: i32, y: i32) -> Result<(), ApplyError> {
        self.commit(GraphOperation::Disconnect {
            at: Point::new(x, y),
        })
    }

    pub fn change_setting(&mut self, x: i32, y: i32, key: &str, value: &str) -> Result<(), ApplyError> {
        self.commit(GraphOperation::ChangeSetting {
            at: Point::new(x, y),
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn trip_wire(&mut self, x: i32, y: i32) -> Result<(), ApplyError> {
        self.commit(GraphOperation::TripWire {
            at: Point::new(x, y),
        })
    }

    // Private methods

    // Applies an authority-originated operation and broadcasts it to everyone
    fn commit(&mut self, operation: GraphOperation) -> Result<(), ApplyError> {
        self.validate_and_apply(&operation)?;
        if self.should_relay(&operation) {
            self.broadcast(&operation);
        }
        Ok(())
    }

    fn validate_and_apply(&mut self, operation: &GraphOperation) -> Result<(), ApplyError> {
        if self.config.reject_blocked_placement {
            self.replica.check(operation)?;
        }
        self.replica.apply(operation)
    }

    fn should_relay(&self, operation: &GraphOperation) -> bool {
        match operation {
            GraphOperation::Request { .. } => false,
            GraphOperation::TripWire { .. } => self.config.relay_trip_wire,
            _ => true,
        }
    }

    /// Read all incoming packets and handle each one in arrival order
    fn receive_packets(&mut self) {
        let mut packets = Vec::new();
        if let Some((_, receiver)) = self.io.as_mut() {
            loop {
                match receiver.receive() {
                    Ok(Some((from, payload))) => {
                        packets.push((from, GraphOperation::from_bytes(payload)));
                    }
                    Ok(None) => {
                        // No more packets, break loop
                        break;
                    }
                    Err(_) => {
                        self.incoming_events.push_error(WirenetServerError::RecvError);
                        break;
                    }
                }
            }
        }

        for (from, decoded) in packets {
            let Some(user_key) = self.user_ids.get(&from).copied() else {
                warn!("Server Error: packet from unknown user {}", from);
                self.incoming_events
                    .push_error(WirenetServerError::UnknownUser { id: from });
                continue;
            };
            if let Some(user) = self.users.get_mut(&user_key) {
                user.mark_received();
            }

            match decoded {
                Ok(operation) => self.handle_operation(from, operation),
                Err(error) => {
                    warn!("Server Error: cannot read malformed packet from {}: {}", from, error);
                    self.incoming_events
                        .push_error(WirenetServerError::Decode { from, error });
                }
            }
        }
    }

    fn handle_operation(&mut self, from: ParticipantId, operation: GraphOperation) {
        info!("{} Received {}", from, operation);

        if let GraphOperation::Request { requester } = operation {
            self.send_snapshot(requester);
            return;
        }

        match self.validate_and_apply(&operation) {
            Ok(()) => {
                if self.should_relay(&operation) {
                    self.broadcast(&operation);
                } else if matches!(operation, GraphOperation::TripWire { .. }) {
                    // an unrelayed trip wire still fires at its origin
                    self.send_to(&from, &operation);
                }
                if let GraphOperation::TripWire { at } = operation {
                    self.incoming_events.push_trip_wire(from, at);
                } else {
                    self.incoming_events.push_operation(from, operation);
                }
            }
            Err(error) => {
                warn!("{} {} dropped: {}", from, operation, error);
                self.incoming_events.push_rejection(from, operation, error);
            }
        }
    }

    // Replays the whole graph to one peer as Place and Connect operations
    fn send_snapshot(&mut self, requester: ParticipantId) {
        let Some(user_key) = self.user_ids.get(&requester).copied() else {
            warn!("Server Error: snapshot requested for unknown user {}", requester);
            self.incoming_events
                .push_error(WirenetServerError::UnknownUser { id: requester });
            return;
        };

        let operations = self.replica.snapshot();
        for operation in &operations {
            self.send_to(&requester, operation);
        }
        if let Some(user) = self.users.get_mut(&user_key) {
            user.mark_snapshot();
        }
        info!("Sent snapshot of {} operations to {}", operations.len(), requester);
        self.incoming_events.push_snapshot(requester, operations.len());
    }

    fn broadcast(&mut self, operation: &GraphOperation) {
        for id in self.user_ids() {
            self.send_to(&id, operation);
        }
    }

    fn send_to(&mut self, to: &ParticipantId, operation: &GraphOperation) {
        let Some((sender, _)) = self.io.as_ref() else {
            warn!("Server Error: cannot send {} to {}, not listening", operation, to);
            self.incoming_events.push_error(WirenetServerError::NotListening);
            return;
        };
        if sender.send(to, &operation.to_bytes()).is_err() {
            warn!("Server Error: Cannot send packet to {}", to);
            self.incoming_events
                .push_error(WirenetServerError::SendError { to: *to });
        }
    }
}
