use std::collections::HashMap;

use log::{info, warn};

use crate::{
    bigmap::BigMap,
    geometry::Point,
    graph::{
        config::GraphConfig,
        device::{Device, PlacedDevice},
        error::GraphError,
        evaluation::Evaluation,
        keys::{DeviceKey, PinKey, WireKey},
        pin::{Pin, PinLinks, PinRole},
        wire::{Wire, WireDraft},
    },
    value::Value,
    world_query::{OpenWorld, WorldQuery},
};

/// Every device, pin and wire known to one participant.
///
/// Devices own their pins; pins and wires refer to each other through keys
/// into this store. Cells covered by a device are indexed so coordinate
/// lookups don't scan the device list.
pub struct GraphStore {
    config: GraphConfig,
    world: Box<dyn WorldQuery>,
    devices: BigMap<DeviceKey, PlacedDevice>,
    pins: BigMap<PinKey, Pin>,
    wires: BigMap<WireKey, Wire>,
    cells: HashMap<Point, Vec<DeviceKey>>,
}

impl GraphStore {
    pub fn new(config: GraphConfig) -> Self {
        Self::with_world(config, OpenWorld)
    }

    pub fn with_world<W: WorldQuery + 'static>(config: GraphConfig, world: W) -> Self {
        Self {
            config,
            world: Box::new(world),
            devices: BigMap::new(),
            pins: BigMap::new(),
            wires: BigMap::new(),
            cells: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn world(&self) -> &dyn WorldQuery {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> &mut dyn WorldQuery {
        self.world.as_mut()
    }

    // Placement

    /// Whether `device` anchored at (x, y) would overlap no placed device and
    /// sit on free terrain
    pub fn can_place(&self, device: &Device, x: i32, y: i32) -> bool {
        let rect = device.bounding_box(Point::new(x, y));
        let overlaps = rect.cells().any(|cell| {
            self.cells
                .get(&cell)
                .map(|occupants| !occupants.is_empty())
                .unwrap_or(false)
        });
        if overlaps {
            return false;
        }
        self.world.is_area_free(&rect)
    }

    /// Inserts the device anchored at (x, y) and materializes its pins.
    /// Does not check `can_place`.
    pub fn place_device(&mut self, device: Device, x: i32, y: i32) -> DeviceKey {
        let anchor = Point::new(x, y);
        let rect = device.bounding_box(anchor);
        let top_left = rect.top_left();
        let layout = device.pin_layout().to_vec();

        let device_key = self.devices.insert(PlacedDevice::new(device, anchor));

        let mut pin_keys = Vec::with_capacity(layout.len());
        for design in &layout {
            let pin = Pin::new(device_key, design, top_left + design.offset);
            pin_keys.push(self.pins.insert(pin));
        }
        if let Some(placed) = self.devices.get_mut(&device_key) {
            placed.pins = pin_keys;
        }

        for cell in rect.cells() {
            self.cells.entry(cell).or_default().push(device_key);
        }

        device_key
    }

    /// Removes the device covering (x, y), disconnecting every one of its pins
    /// first
    pub fn remove_device(&mut self, x: i32, y: i32) -> Result<DeviceKey, GraphError> {
        let Some(device_key) = self.get_device(x, y) else {
            return Err(GraphError::NoDeviceAt { x, y });
        };
        let Some(placed) = self.devices.get(&device_key) else {
            return Err(GraphError::DeviceNotFound);
        };
        let pin_keys = placed.pins().to_vec();
        let rect = placed.rect();

        for pin_key in &pin_keys {
            self.disconnect_pin(*pin_key, None)?;
        }
        for pin_key in &pin_keys {
            self.pins.remove(pin_key);
        }
        for cell in rect.cells() {
            if let Some(occupants) = self.cells.get_mut(&cell) {
                occupants.retain(|key| *key != device_key);
                if occupants.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
        self.devices.remove(&device_key);

        Ok(device_key)
    }

    pub fn change_setting(
        &mut self,
        x: i32,
        y: i32,
        key: &str,
        value: &str,
    ) -> Result<DeviceKey, GraphError> {
        let Some(device_key) = self.get_device(x, y) else {
            return Err(GraphError::NoDeviceAt { x, y });
        };
        let Some(placed) = self.devices.get_mut(&device_key) else {
            return Err(GraphError::DeviceNotFound);
        };
        placed
            .device_mut()
            .settings_mut()
            .insert(key.to_string(), value.to_string());
        Ok(device_key)
    }

    /// Hands a trip-wire notification to the world
    pub fn trip_wire(&mut self, x: i32, y: i32) {
        self.world.trip_wire(x, y);
    }

    // Lookup

    /// The device whose bounding box covers (x, y)
    pub fn get_device(&self, x: i32, y: i32) -> Option<DeviceKey> {
        self.cells
            .get(&Point::new(x, y))
            .and_then(|occupants| occupants.first().copied())
    }

    /// The pin sitting exactly on (x, y)
    pub fn get_device_pin(&self, x: i32, y: i32) -> Option<PinKey> {
        let point = Point::new(x, y);
        let occupants = self.cells.get(&point)?;
        occupants.iter().find_map(|device_key| {
            let placed = self.devices.get(device_key)?;
            placed.pins().iter().copied().find(|pin_key| {
                self.pins
                    .get(pin_key)
                    .map(|pin| pin.location() == point)
                    .unwrap_or(false)
            })
        })
    }

    pub fn device(&self, key: &DeviceKey) -> Option<&PlacedDevice> {
        self.devices.get(key)
    }

    pub fn pin(&self, key: &PinKey) -> Option<&Pin> {
        self.pins.get(key)
    }

    pub fn wire(&self, key: &WireKey) -> Option<&Wire> {
        self.wires.get(key)
    }

    pub fn devices(&self) -> impl Iterator<Item = (DeviceKey, &PlacedDevice)> {
        self.devices.iter()
    }

    pub fn pins(&self) -> impl Iterator<Item = (PinKey, &Pin)> {
        self.pins.iter()
    }

    pub fn wires(&self) -> impl Iterator<Item = (WireKey, &Wire)> {
        self.wires.iter()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// The pin a device declares with the given role and index
    pub fn device_pin(&self, device: &DeviceKey, role: PinRole, index: usize) -> Option<PinKey> {
        let placed = self.devices.get(device)?;
        self.device_pin_of(placed, role, index)
    }

    pub(crate) fn device_pin_of(
        &self,
        placed: &PlacedDevice,
        role: PinRole,
        index: usize,
    ) -> Option<PinKey> {
        let position = placed.pin_design(role, index)?;
        placed.pins().get(position).copied()
    }

    /// The wire running between two pins, in either direction
    pub fn get_wire(&self, pin: &PinKey, other: &PinKey) -> Option<WireKey> {
        let pin_ref = self.pins.get(pin)?;
        pin_ref.wires().iter().copied().find(|wire_key| {
            self.wires
                .get(wire_key)
                .map(|wire| wire.connects(*pin, *other))
                .unwrap_or(false)
        })
    }

    // Connections

    /// Joins an output and an input with a new wire carrying `points`.
    ///
    /// Both endpoints are linked to the same wire. An input that was already
    /// connected loses its previous wire first.
    pub fn connect(
        &mut self,
        start: PinKey,
        end: PinKey,
        points: Vec<Point>,
    ) -> Result<WireKey, GraphError> {
        if start == end {
            return Err(GraphError::SelfConnection);
        }
        let start_role = self.pins.get(&start).ok_or(GraphError::PinNotFound)?.role();
        let end_role = self.pins.get(&end).ok_or(GraphError::PinNotFound)?.role();
        if start_role == end_role {
            return Err(GraphError::IncompatiblePins { role: start_role });
        }

        let wire_key = self.wires.insert(Wire::new(start, end, points));

        // the input side goes first, so its old link is gone before the
        // output records the new one
        let (input, output) = if start_role == PinRole::In {
            (start, end)
        } else {
            (end, start)
        };
        self.connect_pin(input, output, wire_key)?;
        self.connect_pin(output, input, wire_key)?;

        Ok(wire_key)
    }

    /// Finishes a wire being drawn by attaching it to `end`, keeping the
    /// waypoints collected so far
    pub fn commit_draft(&mut self, draft: WireDraft, end: PinKey) -> Result<WireKey, GraphError> {
        let (start, points) = draft.into_parts();
        self.connect(start, end, points)
    }

    /// One half of a connection: records `other` and `wire` on `pin` only.
    ///
    /// An input drops its existing connection first. An output appends
    /// without checking for duplicates.
    pub fn connect_pin(
        &mut self,
        pin: PinKey,
        other: PinKey,
        wire: WireKey,
    ) -> Result<(), GraphError> {
        let role = self.pins.get(&pin).ok_or(GraphError::PinNotFound)?.role();
        if role == PinRole::In {
            self.disconnect_pin(pin, None)?;
        }

        let pin_mut = self.pins.get_mut(&pin).ok_or(GraphError::PinNotFound)?;
        match &mut pin_mut.links {
            PinLinks::Input(connected) => *connected = Some(other),
            PinLinks::Output(connected) => connected.push(other),
        }
        pin_mut.wires.push(wire);
        Ok(())
    }

    /// Breaks links on `pin`.
    ///
    /// - Input, no argument: removes the wire to its output on both sides and
    ///   has the output forget it.
    /// - Output, no argument: fully disconnects every input it feeds.
    /// - Output with an argument: forgets that one input only. Removing the
    ///   wire is left to the caller, which is always the input side.
    ///
    /// Disconnecting a pin that has no links is a no-op.
    pub fn disconnect_pin(&mut self, pin: PinKey, other: Option<PinKey>) -> Result<(), GraphError> {
        let links = self.pins.get(&pin).ok_or(GraphError::PinNotFound)?.links.clone();

        match (links, other) {
            (PinLinks::Input(None), _) => Ok(()),
            (PinLinks::Input(Some(connected)), Some(other)) if connected != other => Ok(()),
            (PinLinks::Input(Some(connected)), _) => {
                self.detach_wires_between(pin, connected);
                if self.pins.contains_key(&connected) {
                    self.disconnect_pin(connected, Some(pin))?;
                }
                if let Some(pin_mut) = self.pins.get_mut(&pin) {
                    pin_mut.links = PinLinks::Input(None);
                }
                Ok(())
            }
            (PinLinks::Output(connected), Some(other)) => {
                if connected.contains(&other) {
                    if let Some(pin_mut) = self.pins.get_mut(&pin) {
                        if let PinLinks::Output(list) = &mut pin_mut.links {
                            list.retain(|key| *key != other);
                        }
                    }
                }
                Ok(())
            }
            (PinLinks::Output(connected), None) => {
                for partner in &connected {
                    let partner_connected = self
                        .pins
                        .get(partner)
                        .map(|partner_pin| partner_pin.is_connected(None))
                        .unwrap_or(false);
                    if partner_connected {
                        self.disconnect_pin(*partner, None)?;
                    }
                }
                for partner in &connected {
                    self.detach_wires_between(pin, *partner);
                }
                if let Some(pin_mut) = self.pins.get_mut(&pin) {
                    pin_mut.links = PinLinks::Output(Vec::new());
                }
                Ok(())
            }
        }
    }

    // Drops every wire joining `a` and `b` from both pins and from the store
    fn detach_wires_between(&mut self, a: PinKey, b: PinKey) {
        let mut doomed = Vec::new();
        for pin_key in [a, b] {
            let Some(pin) = self.pins.get(&pin_key) else {
                continue;
            };
            for wire_key in pin.wires() {
                let joins = self
                    .wires
                    .get(wire_key)
                    .map(|wire| wire.connects(a, b))
                    .unwrap_or(true);
                if joins && !doomed.contains(wire_key) {
                    doomed.push(*wire_key);
                }
            }
        }
        if doomed.is_empty() {
            return;
        }
        for pin_key in [a, b] {
            if let Some(pin) = self.pins.get_mut(&pin_key) {
                pin.wires.retain(|wire_key| !doomed.contains(wire_key));
            }
        }
        for wire_key in &doomed {
            self.wires.remove(wire_key);
        }
    }

    // Evaluation

    /// Pulls the current value of a pin through everything upstream of it
    pub fn pin_value(&self, pin: &PinKey) -> Value {
        Evaluation::new(self).pin_value(*pin)
    }

    /// The value on a device's output pin `index`
    pub fn output_value(&self, device: &DeviceKey, index: usize) -> Value {
        match self.device_pin(device, PinRole::Out, index) {
            Some(pin) => self.pin_value(&pin),
            None => Value::empty(),
        }
    }

    // Inspection

    /// The full drawn path of a wire: start pin, waypoints, end pin
    pub fn wire_path(&self, wire: &WireKey) -> Option<Vec<Point>> {
        let wire = self.wires.get(wire)?;
        let start = self.pins.get(&wire.start_pin())?.location();
        let end = self.pins.get(&wire.end_pin())?.location();

        let mut path = Vec::with_capacity(wire.points().len() + 2);
        path.push(start);
        path.extend_from_slice(wire.points());
        path.push(end);
        Some(path)
    }

    /// One line per pin link of the device, as shown by the debug inspector
    pub fn debug_lines(&self, device: &DeviceKey) -> Vec<String> {
        let Some(placed) = self.devices.get(device) else {
            warn!("Debug: device {:?} is not placed", device);
            return Vec::new();
        };

        let mut lines = Vec::new();
        for pin_key in placed.pins() {
            let Some(pin) = self.pins.get(pin_key) else {
                continue;
            };
            let partners = pin.connected_pins();
            let value = || self.pin_value(pin_key).describe(pin.data_type());

            if partners.is_empty() {
                match pin.role() {
                    PinRole::In => lines.push(format!("{} (Disconnected)", pin.name())),
                    PinRole::Out => {
                        lines.push(format!("{} (Disconnected) [{}]", pin.name(), value()))
                    }
                }
                continue;
            }

            for partner_key in partners {
                let Some(partner) = self.pins.get(&partner_key) else {
                    continue;
                };
                let partner_device = self
                    .devices
                    .get(&partner.device())
                    .map(|placed| placed.name())
                    .unwrap_or("?");
                lines.push(format!(
                    "{} [{}] => {} {}",
                    pin.name(),
                    value(),
                    partner_device,
                    partner.name()
                ));
            }
        }
        info!("Debug {} at {}: {} lines", placed.name(), placed.anchor(), lines.len());
        lines
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}
