mod error;

pub use error::ApplyError;

use log::{info, warn};

use crate::{
    devices::registry::DeviceRegistry,
    graph::{config::GraphConfig, device::Device, error::GraphError, graph_store::GraphStore},
    protocol::{snapshot_operations, GraphOperation},
    world_query::WorldQuery,
};

/// One participant's copy of the graph together with the registry used to
/// resolve Place operations
pub struct Replica {
    registry: DeviceRegistry,
    graph: GraphStore,
}

impl Replica {
    pub fn new(registry: DeviceRegistry, config: GraphConfig) -> Self {
        Self {
            registry,
            graph: GraphStore::new(config),
        }
    }

    pub fn with_world<W: WorldQuery + 'static>(
        registry: DeviceRegistry,
        config: GraphConfig,
        world: W,
    ) -> Self {
        Self {
            registry,
            graph: GraphStore::with_world(config, world),
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphStore {
        &mut self.graph
    }

    /// Authority-side validation run before `apply` when blocked placements
    /// are to be refused. Only Place can fail here.
    pub fn check(&self, operation: &GraphOperation) -> Result<(), ApplyError> {
        let GraphOperation::Place { kind, anchor, .. } = operation else {
            return Ok(());
        };
        let device = self.registry.create(kind)?;
        if self.graph.can_place(&device, anchor.x, anchor.y) {
            Ok(())
        } else {
            Err(ApplyError::PlacementBlocked {
                kind: kind.clone(),
                x: anchor.x,
                y: anchor.y,
            })
        }
    }

    /// Applies an operation to the local graph.
    ///
    /// Placement is permissive: a blocked footprint is logged and the device
    /// is placed anyway. Request carries no graph change and is accepted as
    /// is.
    pub fn apply(&mut self, operation: &GraphOperation) -> Result<(), ApplyError> {
        match operation {
            GraphOperation::Place {
                kind,
                anchor,
                settings,
            } => {
                let mut device = self.registry.create(kind)?;
                overlay_settings(&mut device, settings);
                if !self.graph.can_place(&device, anchor.x, anchor.y) {
                    warn!("Placing {} at {} over an occupied area", kind, anchor);
                }
                self.graph.place_device(device, anchor.x, anchor.y);
            }
            GraphOperation::Remove { at } => {
                self.graph.remove_device(at.x, at.y)?;
            }
            GraphOperation::Connect {
                source,
                destination,
                points,
            } => {
                let Some(source_pin) = self.graph.get_device_pin(source.x, source.y) else {
                    return Err(GraphError::NoPinAt {
                        x: source.x,
                        y: source.y,
                    }
                    .into());
                };
                let Some(destination_pin) = self.graph.get_device_pin(destination.x, destination.y)
                else {
                    return Err(GraphError::NoPinAt {
                        x: destination.x,
                        y: destination.y,
                    }
                    .into());
                };
                self.graph.connect(source_pin, destination_pin, points.clone())?;
            }
            GraphOperation::Disconnect { at } => {
                let Some(pin) = self.graph.get_device_pin(at.x, at.y) else {
                    return Err(GraphError::NoPinAt { x: at.x, y: at.y }.into());
                };
                self.graph.disconnect_pin(pin, None)?;
            }
            GraphOperation::ChangeSetting { at, key, value } => {
                self.graph.change_setting(at.x, at.y, key, value)?;
            }
            GraphOperation::TripWire { at } => {
                info!("Trip wire at {}", at);
                self.graph.trip_wire(at.x, at.y);
            }
            GraphOperation::Request { .. } => {}
        }
        Ok(())
    }

    /// Operations that rebuild this replica on an empty one
    pub fn snapshot(&self) -> Vec<GraphOperation> {
        snapshot_operations(&self.graph)
    }
}

impl Default for Replica {
    fn default() -> Self {
        Self::new(DeviceRegistry::default(), GraphConfig::default())
    }
}

// Received settings win over the kind's defaults, unknown keys included
fn overlay_settings(device: &mut Device, settings: &[(String, String)]) {
    let target = device.settings_mut();
    for (key, value) in settings {
        target.insert(key.clone(), value.clone());
    }
}
