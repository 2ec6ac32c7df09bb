use std::collections::BTreeMap;

use crate::{
    geometry::{Point, Rect},
    graph::{
        evaluation::Evaluate,
        keys::PinKey,
        pin::{PinDesign, PinRole},
    },
};

/// Per-device string settings. Order carries no meaning.
pub type Settings = BTreeMap<String, String>;

/// A device instance as produced by the registry, not yet placed in a graph
pub struct Device {
    kind: &'static str,
    name: &'static str,
    width: i32,
    height: i32,
    origin: Point,
    pin_layout: Vec<PinDesign>,
    settings: Settings,
    evaluator: Option<Box<dyn Evaluate>>,
}

impl Device {
    pub fn new(kind: &'static str, name: &'static str, width: i32, height: i32, origin: Point) -> Self {
        Self {
            kind,
            name,
            width,
            height,
            origin,
            pin_layout: Vec::new(),
            settings: Settings::new(),
            evaluator: None,
        }
    }

    pub fn with_pin(mut self, design: PinDesign) -> Self {
        self.pin_layout.push(design);
        self
    }

    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_evaluator<E: Evaluate + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The anchor cell, relative to the top-left cell
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn pin_layout(&self) -> &[PinDesign] {
        &self.pin_layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn evaluator(&self) -> Option<&dyn Evaluate> {
        self.evaluator.as_deref()
    }

    /// The cells this device covers when anchored at `anchor`
    pub fn bounding_box(&self, anchor: Point) -> Rect {
        let top_left = anchor - self.origin;
        Rect::new(top_left.x, top_left.y, self.width, self.height)
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("origin", &self.origin)
            .field("settings", &self.settings)
            .finish()
    }
}

/// A device living in a GraphStore
#[derive(Debug)]
pub struct PlacedDevice {
    device: Device,
    anchor: Point,
    pub(crate) pins: Vec<PinKey>,
}

impl PlacedDevice {
    pub(crate) fn new(device: Device, anchor: Point) -> Self {
        Self {
            device,
            anchor,
            pins: Vec::new(),
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub(crate) fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }

    pub fn kind(&self) -> &'static str {
        self.device.kind()
    }

    pub fn name(&self) -> &'static str {
        self.device.name()
    }

    /// The cell the device was placed at
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn top_left(&self) -> Point {
        self.anchor - self.device.origin()
    }

    pub fn rect(&self) -> Rect {
        self.device.bounding_box(self.anchor)
    }

    pub fn settings(&self) -> &Settings {
        self.device.settings()
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.device.settings().get(key).map(String::as_str)
    }

    pub fn pins(&self) -> &[PinKey] {
        &self.pins
    }

    pub(crate) fn pin_design(&self, role: PinRole, index: usize) -> Option<usize> {
        self.device
            .pin_layout()
            .iter()
            .position(|design| design.role == role && design.index == index)
    }
}
