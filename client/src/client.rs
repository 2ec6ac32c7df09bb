use std::mem;

use log::{info, warn};

use wirenet_shared::{
    DeviceRegistry, GraphConfig, GraphOperation, GraphStore, ParticipantId, Point, Replica,
    WorldQuery,
};

use crate::{
    events::Events,
    transport::{PacketReceiver, PacketSender},
    ClientConfig, WirenetClientError,
};

/// A peer of a session.
///
/// Intents are sent to the authority and only reach the local graph when
/// the authority relays them back, so the local graph always follows the
/// authority's order of record. Operations arriving from the authority are
/// applied as they come, without validation.
pub struct Client {
    config: ClientConfig,
    id: ParticipantId,
    replica: Replica,
    io: Option<(Box<dyn PacketSender>, Box<dyn PacketReceiver>)>,
    incoming_events: Events,
}

impl Client {
    /// Create a new Client
    pub fn new(
        id: ParticipantId,
        config: ClientConfig,
        registry: DeviceRegistry,
        graph_config: GraphConfig,
    ) -> Self {
        Self::from_replica(id, config, Replica::new(registry, graph_config))
    }

    /// Create a new Client whose graph consults `world` for placement and
    /// trip wires
    pub fn with_world<W: WorldQuery + 'static>(
        id: ParticipantId,
        config: ClientConfig,
        registry: DeviceRegistry,
        graph_config: GraphConfig,
        world: W,
    ) -> Self {
        Self::from_replica(id, config, Replica::with_world(registry, graph_config, world))
    }

    fn from_replica(id: ParticipantId, config: ClientConfig, replica: Replica) -> Self {
        Self {
            config,
            id,
            replica,
            io: None,
            incoming_events: Events::new(),
        }
    }

    /// Attaches the transport to the authority, and asks for a snapshot if
    /// configured to
    pub fn connect(
        &mut self,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Result<(), WirenetClientError> {
        self.io = Some((sender, receiver));
        info!("{} connected", self.id);
        if self.config.request_snapshot_on_connect {
            self.request_snapshot()?;
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.io.take().is_some() {
            info!("{} disconnected", self.id);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.io.is_some()
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn config(&self) -> &ClientConfig {
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

    /// Must be called regularly, applies every operation the authority has
    /// sent since the last call
    pub fn receive(&mut self) -> Events {
        self.receive_packets();

        // return all received events and reset the buffer
        mem::replace(&mut self.incoming_events, Events::new())
    }

    /// Asks the authority to replay its whole graph to this client
    pub fn request_snapshot(&mut self) -> Result<(), WirenetClientError> {
        self.send(&GraphOperation::Request { requester: self.id })
    }

    // Intents

    /// Places a device with its default settings
    pub fn place_device(&mut self, kind: &str, x: i32, y: i32) -> Result<(), WirenetClientError> {
        let device = self
            .replica
            .registry()
            .create(kind)
            .map_err(|error| WirenetClientError::Apply(error.into()))?;
        let settings = device
            .settings()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        self.submit(GraphOperation::Place {
            kind: kind.to_string(),
            anchor: Point::new(x, y),
            settings,
        })
    }

    pub fn remove_device(&mut self, x: i32, y: i32) -> Result<(), WirenetClientError> {
        self.submit(GraphOperation::Remove {
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
    ) -> Result<(), WirenetClientError> {
        self.submit(GraphOperation::Connect {
            source,
            destination,
            points,
        })
    }

    pub fn disconnect_pin(&mut self, x: i32, y: i32) -> Result<(), WirenetClientError> {
        self.submit(GraphOperation::Disconnect {
            at: Point::new(x, y),
        })
    }

    pub fn change_setting(
        &mut self,
        x: i32,
        y: i32,
        key: &str,
        value: &str,
    ) -> Result<(), WirenetClientError> {
        self.submit(GraphOperation::ChangeSetting {
            at: Point::new(x, y),
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn trip_wire(&mut self, x: i32, y: i32) -> Result<(), WirenetClientError> {
        self.submit(GraphOperation::TripWire {
            at: Point::new(x, y),
        })
    }

    // Private methods

    // The local graph is left alone until the authority relays the
    // operation back
    fn submit(&mut self, operation: GraphOperation) -> Result<(), WirenetClientError> {
        if !self.is_connected() {
            return Err(WirenetClientError::NotConnected);
        }
        self.send(&operation)
    }

    fn send(&mut self, operation: &GraphOperation) -> Result<(), WirenetClientError> {
        let Some((sender, _)) = self.io.as_ref() else {
            return Err(WirenetClientError::NotConnected);
        };
        sender
            .send(&operation.to_bytes())
            .map_err(|_| WirenetClientError::SendError)
    }

    fn receive_packets(&mut self) {
        let mut packets = Vec::new();
        if let Some((_, receiver)) = self.io.as_mut() {
            loop {
                match receiver.receive() {
                    Ok(Some(payload)) => {
                        packets.push(GraphOperation::from_bytes(payload));
                    }
                    Ok(None) => {
                        // No more packets, break loop
                        break;
                    }
                    Err(_) => {
                        self.incoming_events.push_error(WirenetClientError::RecvError);
                        break;
                    }
                }
            }
        }

        for decoded in packets {
            match decoded {
                Ok(operation) => self.handle_operation(operation),
                Err(error) => {
                    warn!("Client Error: cannot read malformed packet: {}", error);
                    self.incoming_events
                        .push_error(WirenetClientError::Decode(error));
                }
            }
        }
    }

    fn handle_operation(&mut self, operation: GraphOperation) {
        info!("{} Received {}", self.id, operation);

        if let GraphOperation::Request { requester } = operation {
            warn!("{} ignoring snapshot request from {}, not the authority", self.id, requester);
            return;
        }

        match self.replica.apply(&operation) {
            Ok(()) => {
                if let GraphOperation::TripWire { at } = operation {
                    self.incoming_events.push_trip_wire(at);
                } else {
                    self.incoming_events.push_operation(operation);
                }
            }
            Err(error) => {
                warn!("{} {} dropped: {}", self.id, operation, error);
                self.incoming_events.push_rejection(operation, error);
            }
        }
    }
}
