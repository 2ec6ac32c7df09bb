//! # Wirenet Server
//! The authority of a wirenet session. Receives circuit graph operations from
//! connected peers, applies them to the canonical graph, relays the ones that
//! apply to every peer, and answers snapshot requests.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use wirenet_shared::{
        ApplyError, DeviceRegistry, GraphConfig, GraphOperation, GraphStore, OpenWorld,
        ParticipantId, Point, WorldQuery,
    };
}

mod error;
mod events;
mod server;
mod server_config;
mod user;

pub use error::WirenetServerError;
pub use events::{
    ConnectEvent, DisconnectEvent, ErrorEvent, Event, Events, OperationEvent, RejectEvent,
    SnapshotEvent, TripWireEvent,
};
pub use server::Server;
pub use server_config::ServerConfig;
pub use user::{User, UserKey};
