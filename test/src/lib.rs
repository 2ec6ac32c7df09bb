//! Helpers for end-to-end tests of a wirenet session: an in-memory hub that
//! connects one server and many clients, and an order-independent graph
//! summary to compare their replicas.

mod graph_summary;
mod local_hub;

pub use graph_summary::GraphSummary;
pub use local_hub::{LocalHub, Settled};

use wirenet_server::{Server, ServerConfig};
use wirenet_shared::{DeviceRegistry, GraphConfig};

/// A hub around a server built with the standard devices
pub fn hub_with_config(config: ServerConfig) -> LocalHub {
    LocalHub::new(Server::new(
        config,
        DeviceRegistry::default(),
        GraphConfig::default(),
    ))
}
