/// In-memory hub for end-to-end tests.
/// Routes packets between one server and any number of clients over channel
/// transports, without network I/O.
use std::collections::{btree_map::Entry, BTreeMap};

use log::warn;

use wirenet_client::{
    transport::{
        channel::PacketChannel as ClientChannel, PacketReceiver as ClientPacketReceiver,
        PacketSender as ClientPacketSender,
    },
    Client, ClientConfig, Events as ClientEvents,
};
use wirenet_server::{
    transport::{
        channel::PacketChannel as ServerChannel, PacketReceiver as ServerPacketReceiver,
        PacketSender as ServerPacketSender,
    },
    Events as ServerEvents, Server,
};
use wirenet_shared::{DeviceRegistry, GraphConfig, ParticipantId};

// Upper bound on exchange rounds in `settle`
const MAX_ROUNDS: usize = 64;

// The hub's ends of one client's transport
struct ClientLink {
    to_client: Box<dyn ClientPacketSender>,
    from_client: Box<dyn ClientPacketReceiver>,
}

/// Everything the server and clients reported while settling
#[derive(Default)]
pub struct Settled {
    pub server: Vec<ServerEvents>,
    pub clients: Vec<(ParticipantId, ClientEvents)>,
}

pub struct LocalHub {
    server: Server,
    to_server: Box<dyn ServerPacketSender>,
    from_server: Box<dyn ServerPacketReceiver>,
    clients: BTreeMap<ParticipantId, Client>,
    links: BTreeMap<ParticipantId, ClientLink>,
}

impl LocalHub {
    pub fn new(mut server: Server) -> Self {
        let (server_sender, from_server) = ServerChannel::unbounded();
        let (to_server, server_receiver) = ServerChannel::unbounded();
        server.listen(server_sender, server_receiver);

        Self {
            server,
            to_server,
            from_server,
            clients: BTreeMap::new(),
            links: BTreeMap::new(),
        }
    }

    /// Registers a client with default settings and attaches its transport
    pub fn add_client(&mut self, id: ParticipantId, config: ClientConfig) -> &mut Client {
        let client = Client::new(id, config, DeviceRegistry::default(), GraphConfig::default());
        self.attach_client(client)
    }

    /// Registers an already built client with the server and attaches its
    /// transport
    pub fn attach_client(&mut self, mut client: Client) -> &mut Client {
        let id = client.id();
        self.server.user_connect(id);

        let (client_sender, from_client) = ClientChannel::unbounded();
        let (to_client, client_receiver) = ClientChannel::unbounded();
        if client.connect(client_sender, client_receiver).is_err() {
            warn!("Hub: client {} could not send its snapshot request", id);
        }

        self.links.insert(
            id,
            ClientLink {
                to_client,
                from_client,
            },
        );
        match self.clients.entry(id) {
            Entry::Occupied(mut entry) => {
                warn!("Hub: replacing client {}", id);
                entry.insert(client);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(client),
        }
    }

    /// Disconnects a client from the server and drops it
    pub fn remove_client(&mut self, id: &ParticipantId) -> Option<Client> {
        self.server.user_disconnect(id);
        self.links.remove(id);
        self.clients.remove(id)
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut Server {
        &mut self.server
    }

    pub fn client(&self, id: &ParticipantId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn client_mut(&mut self, id: &ParticipantId) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    pub fn client_ids(&self) -> Vec<ParticipantId> {
        self.clients.keys().copied().collect()
    }

    /// Moves every queued packet one hop. Returns how many packets moved.
    pub fn pump(&mut self) -> usize {
        let mut moved = 0;

        // clients to server
        for (id, link) in self.links.iter_mut() {
            while let Ok(Some(payload)) = link.from_client.receive() {
                if self.to_server.send(id, payload).is_err() {
                    warn!("Hub: cannot forward packet from {}", id);
                }
                moved += 1;
            }
        }

        // server to clients
        while let Ok(Some((to, payload))) = self.from_server.receive() {
            moved += 1;
            let Some(link) = self.links.get(&to) else {
                warn!("Hub: dropping packet for unknown client {}", to);
                continue;
            };
            if link.to_client.send(payload).is_err() {
                warn!("Hub: cannot forward packet to {}", to);
            }
        }

        moved
    }

    /// Exchanges packets and lets every participant receive until nothing
    /// is left in flight
    pub fn settle(&mut self) -> Settled {
        let mut settled = Settled::default();

        for _ in 0..MAX_ROUNDS {
            let mut moved = self.pump();
            let server_events = self.server.receive();
            moved += self.pump();

            let mut quiet = server_events.is_empty();
            settled.server.push(server_events);
            for (id, client) in self.clients.iter_mut() {
                let client_events = client.receive();
                quiet &= client_events.is_empty();
                settled.clients.push((*id, client_events));
            }

            if moved == 0 && quiet {
                return settled;
            }
        }

        warn!("Hub: still exchanging packets after {} rounds", MAX_ROUNDS);
        settled
    }
}
