use std::fmt;

use crate::{
    geometry::Point,
    graph::keys::{DeviceKey, PinKey, WireKey},
    value::DataType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinRole {
    In,
    Out,
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinRole::In => f.write_str("In"),
            PinRole::Out => f.write_str("Out"),
        }
    }
}

/// A pin as declared by a device kind, before placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinDesign {
    pub role: PinRole,
    pub index: usize,
    /// Offset from the device's top-left cell
    pub offset: Point,
    pub data_type: DataType,
    pub name: Option<String>,
}

impl PinDesign {
    pub fn new(role: PinRole, index: usize, offset: Point, data_type: DataType) -> Self {
        Self {
            role,
            index,
            offset,
            data_type,
            name: None,
        }
    }

    pub fn input(index: usize, offset: Point, data_type: DataType) -> Self {
        Self::new(PinRole::In, index, offset, data_type)
    }

    pub fn output(index: usize, offset: Point, data_type: DataType) -> Self {
        Self::new(PinRole::Out, index, offset, data_type)
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// The connection side of a pin. An input follows at most one output, an
/// output feeds any number of inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinLinks {
    Input(Option<PinKey>),
    Output(Vec<PinKey>),
}

/// A placed pin. Links are only changed through `GraphStore` so both ends of
/// a connection stay mirrored.
#[derive(Clone, Debug)]
pub struct Pin {
    device: DeviceKey,
    index: usize,
    location: Point,
    data_type: DataType,
    name: Option<String>,
    pub(crate) links: PinLinks,
    pub(crate) wires: Vec<WireKey>,
}

impl Pin {
    pub(crate) fn new(device: DeviceKey, design: &PinDesign, location: Point) -> Self {
        let links = match design.role {
            PinRole::In => PinLinks::Input(None),
            PinRole::Out => PinLinks::Output(Vec::new()),
        };
        Self {
            device,
            index: design.index,
            location,
            data_type: design.data_type,
            name: design.name.clone(),
            links,
            wires: Vec::new(),
        }
    }

    pub fn device(&self) -> DeviceKey {
        self.device
    }

    pub fn role(&self) -> PinRole {
        match self.links {
            PinLinks::Input(_) => PinRole::In,
            PinLinks::Output(_) => PinRole::Out,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The declared name, or `Pin<role><index>` when none was given
    pub fn name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Pin{}{}", self.role(), self.index),
        }
    }

    pub fn links(&self) -> &PinLinks {
        &self.links
    }

    pub fn wires(&self) -> &[WireKey] {
        &self.wires
    }

    /// Without an argument: whether anything is connected. With one: whether
    /// that particular pin is connected to this one.
    pub fn is_connected(&self, other: Option<&PinKey>) -> bool {
        match (&self.links, other) {
            (PinLinks::Input(connected), None) => connected.is_some(),
            (PinLinks::Input(connected), Some(other)) => connected.as_ref() == Some(other),
            (PinLinks::Output(connected), None) => !connected.is_empty(),
            (PinLinks::Output(connected), Some(other)) => connected.contains(other),
        }
    }

    /// The output an input pin follows
    pub fn connected_pin(&self) -> Option<PinKey> {
        match &self.links {
            PinLinks::Input(connected) => *connected,
            PinLinks::Output(_) => None,
        }
    }

    /// Every pin linked to this one
    pub fn connected_pins(&self) -> Vec<PinKey> {
        match &self.links {
            PinLinks::Input(connected) => connected.iter().copied().collect(),
            PinLinks::Output(connected) => connected.clone(),
        }
    }
}
