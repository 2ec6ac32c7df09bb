//! # Wirenet Client
//! A peer of a wirenet session. Sends circuit graph edits to the authority
//! and mirrors every operation the authority relays, its own included.

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

mod client;
mod client_config;
mod error;
mod events;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::WirenetClientError;
pub use events::{ErrorEvent, Event, Events, OperationEvent, RejectEvent, TripWireEvent};
