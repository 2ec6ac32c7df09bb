use std::collections::BTreeSet;

use wirenet_shared::{GraphStore, Point};

/// Order-independent view of a graph's topology, for comparing replicas
/// whose devices were inserted in different orders
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub devices: BTreeSet<(String, Point, Vec<(String, String)>)>,
    pub wires: BTreeSet<(Point, Point, Vec<Point>)>,
}

impl GraphSummary {
    pub fn of(graph: &GraphStore) -> Self {
        let devices = graph
            .devices()
            .map(|(_, placed)| {
                let settings = placed
                    .settings()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                (placed.kind().to_string(), placed.anchor(), settings)
            })
            .collect();

        let wires = graph
            .wires()
            .filter_map(|(_, wire)| {
                let start = graph.pin(&wire.start_pin())?.location();
                let end = graph.pin(&wire.end_pin())?.location();
                Some((start, end, wire.points().to_vec()))
            })
            .collect();

        Self { devices, wires }
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }
}
