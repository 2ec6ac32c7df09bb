use thiserror::Error;

use crate::{devices::error::RegistryError, graph::error::GraphError};

/// Why an operation could not be applied to a replica
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The device's footprint overlaps another device or blocked terrain
    #[error("Cannot place {kind} at: x {x}, y {y}")]
    PlacementBlocked { kind: String, x: i32, y: i32 },
}
