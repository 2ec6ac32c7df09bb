use std::collections::HashSet;

use log::warn;

use crate::{
    geometry::Point,
    graph::{
        device::PlacedDevice,
        graph_store::GraphStore,
        keys::PinKey,
        pin::{Pin, PinLinks, PinRole},
    },
    value::Value,
};

/// The per-kind value function of a device.
///
/// Called each time one of the device's output pins is read. Implementations
/// must be pure functions of the connected inputs and the device settings,
/// and must return the kind's documented sentinel rather than fail.
pub trait Evaluate: Send + Sync {
    fn output(&self, context: &mut DeviceContext) -> Value;
}

/// A single value request walking upstream through the graph
pub struct Evaluation<'g> {
    graph: &'g GraphStore,
    in_progress: HashSet<PinKey>,
    depth: usize,
    max_depth: usize,
}

impl<'g> Evaluation<'g> {
    pub fn new(graph: &'g GraphStore) -> Self {
        Self {
            graph,
            in_progress: HashSet::new(),
            depth: 0,
            max_depth: graph.config().max_evaluation_depth,
        }
    }

    /// Resolves the value on a pin. Inputs read their connected output,
    /// outputs ask their device.
    pub fn pin_value(&mut self, pin_key: PinKey) -> Value {
        let graph = self.graph;
        let Some(pin) = graph.pin(&pin_key) else {
            return Value::empty();
        };
        match pin.links() {
            PinLinks::Input(None) => Value::empty(),
            PinLinks::Input(Some(source)) => self.pin_value(*source),
            PinLinks::Output(_) => self.output_value(pin_key, pin),
        }
    }

    fn output_value(&mut self, pin_key: PinKey, pin: &'g Pin) -> Value {
        let graph = self.graph;
        let Some(device) = graph.device(&pin.device()) else {
            return Value::empty();
        };
        let Some(evaluator) = device.device().evaluator() else {
            return Value::empty();
        };

        if self.depth >= self.max_depth {
            warn!(
                "Evaluation depth limit {} reached at {} {}",
                self.max_depth,
                device.name(),
                pin.name()
            );
            return Value::empty();
        }
        if !self.in_progress.insert(pin_key) {
            warn!(
                "Feedback loop through {} {} at {}",
                device.name(),
                pin.name(),
                pin.location()
            );
            return Value::empty();
        }

        self.depth += 1;
        let value = {
            let mut context = DeviceContext {
                evaluation: self,
                device,
                pin,
            };
            evaluator.output(&mut context)
        };
        self.depth -= 1;
        self.in_progress.remove(&pin_key);

        value
    }
}

/// What a device sees while computing one of its outputs
pub struct DeviceContext<'e, 'g> {
    evaluation: &'e mut Evaluation<'g>,
    device: &'g PlacedDevice,
    pin: &'g Pin,
}

impl<'e, 'g> DeviceContext<'e, 'g> {
    /// Index of the output pin being read
    pub fn pin_index(&self) -> usize {
        self.pin.index()
    }

    pub fn anchor(&self) -> Point {
        self.device.anchor()
    }

    pub fn setting(&self, key: &str) -> Option<&'g str> {
        self.device.setting(key)
    }

    pub fn is_connected(&self, index: usize) -> bool {
        self.input_pin(index)
            .map(|(_, pin)| pin.is_connected(None))
            .unwrap_or(false)
    }

    /// The value on input `index`, or None when that input is disconnected
    pub fn input(&mut self, index: usize) -> Option<Value> {
        let (key, pin) = self.input_pin(index)?;
        if !pin.is_connected(None) {
            return None;
        }
        Some(self.evaluation.pin_value(key))
    }

    /// Same as `input`, addressing the pin by its display name
    pub fn input_named(&mut self, name: &str) -> Option<Value> {
        let graph = self.evaluation.graph;
        let key = self.device.pins().iter().copied().find(|key| {
            graph
                .pin(key)
                .map(|pin| pin.role() == PinRole::In && pin.name() == name)
                .unwrap_or(false)
        })?;
        let pin = graph.pin(&key)?;
        if !pin.is_connected(None) {
            return None;
        }
        Some(self.evaluation.pin_value(key))
    }

    fn input_pin(&self, index: usize) -> Option<(PinKey, &'g Pin)> {
        let graph = self.evaluation.graph;
        let key = graph.device_pin_of(self.device, PinRole::In, index)?;
        graph.pin(&key).map(|pin| (key, pin))
    }
}
