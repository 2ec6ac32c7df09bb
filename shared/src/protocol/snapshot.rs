use crate::{
    graph::{graph_store::GraphStore, pin::PinRole},
    protocol::GraphOperation,
};

/// The operations that rebuild `graph` on an empty store: one Place per
/// device with its current settings, then one Connect per connected input.
pub fn snapshot_operations(graph: &GraphStore) -> Vec<GraphOperation> {
    let mut operations = Vec::new();

    for (_, placed) in graph.devices() {
        operations.push(GraphOperation::Place {
            kind: placed.kind().to_string(),
            anchor: placed.anchor(),
            settings: placed
                .settings()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        });
    }

    for (_, placed) in graph.devices() {
        for pin_key in placed.pins() {
            let Some(pin) = graph.pin(pin_key) else {
                continue;
            };
            if pin.role() != PinRole::In {
                continue;
            }
            let Some(partner_key) = pin.connected_pin() else {
                continue;
            };
            let Some(partner) = graph.pin(&partner_key) else {
                continue;
            };

            // replay the wire as it was drawn so waypoints keep their order
            let wire = graph
                .get_wire(pin_key, &partner_key)
                .and_then(|wire_key| graph.wire(&wire_key));
            let operation = match wire {
                Some(wire) => {
                    let (Some(start), Some(end)) =
                        (graph.pin(&wire.start_pin()), graph.pin(&wire.end_pin()))
                    else {
                        continue;
                    };
                    GraphOperation::Connect {
                        source: start.location(),
                        destination: end.location(),
                        points: wire.points().to_vec(),
                    }
                }
                None => GraphOperation::Connect {
                    source: pin.location(),
                    destination: partner.location(),
                    points: Vec::new(),
                },
            };
            operations.push(operation);
        }
    }

    operations
}
