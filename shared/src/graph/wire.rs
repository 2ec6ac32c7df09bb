use crate::{geometry::Point, graph::keys::PinKey};

/// An edge between one output pin and one input pin.
///
/// Endpoints are fixed at construction. Waypoints only describe the drawn path
/// and are never read by evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    start_pin: PinKey,
    end_pin: PinKey,
    points: Vec<Point>,
}

impl Wire {
    pub fn new(start_pin: PinKey, end_pin: PinKey, points: Vec<Point>) -> Self {
        Self {
            start_pin,
            end_pin,
            points,
        }
    }

    pub fn start_pin(&self) -> PinKey {
        self.start_pin
    }

    pub fn end_pin(&self) -> PinKey {
        self.end_pin
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether this wire runs between the two pins, in either direction
    pub fn connects(&self, a: PinKey, b: PinKey) -> bool {
        (self.start_pin == a && self.end_pin == b) || (self.start_pin == b && self.end_pin == a)
    }

    pub fn other_end(&self, pin: PinKey) -> Option<PinKey> {
        if self.start_pin == pin {
            Some(self.end_pin)
        } else if self.end_pin == pin {
            Some(self.start_pin)
        } else {
            None
        }
    }
}

/// A wire still being drawn. It is attached to nothing until committed
/// through `GraphStore::commit_draft`, and waypoints may only be appended.
/// Repeating the last waypoint is ignored.
#[derive(Clone, Debug)]
pub struct WireDraft {
    start_pin: PinKey,
    points: Vec<Point>,
}

impl WireDraft {
    pub fn new(start_pin: PinKey) -> Self {
        Self {
            start_pin,
            points: Vec::new(),
        }
    }

    pub fn start_pin(&self) -> PinKey {
        self.start_pin
    }

    pub fn add_point(&mut self, point: Point) {
        if self.points.last() == Some(&point) {
            return;
        }
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_parts(self) -> (PinKey, Vec<Point>) {
        (self.start_pin, self.points)
    }
}
