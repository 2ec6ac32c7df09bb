use std::fmt;

use crate::geometry::Point;

const TRUE_TEXT: &str = "1";
const FALSE_TEXT: &str = "0";
const INVALID_TEXT: &str = "-1";

/// The data type tag a pin declares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int,
    String,
    Point,
    Area,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::String => "string",
            DataType::Point => "point",
            DataType::Area => "area",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pin value as carried on the circuit bus.
///
/// Values stay text-encoded so every device reads the same representation,
/// while parsing into typed data happens here rather than per device. The
/// empty value means "disconnected or unsupported"; `-1` is the invalid result
/// of numeric and boolean devices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Value(String);

impl Value {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn invalid() -> Self {
        Self(INVALID_TEXT.to_string())
    }

    pub fn from_bool(value: bool) -> Self {
        Self(if value { TRUE_TEXT } else { FALSE_TEXT }.to_string())
    }

    pub fn from_int(value: i32) -> Self {
        Self(value.to_string())
    }

    pub fn from_point(point: Point) -> Self {
        Self(point.to_string())
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        self.0 == INVALID_TEXT
    }

    pub fn as_int(&self) -> Option<i32> {
        self.0.trim().parse::<i32>().ok()
    }

    /// "1" is true and "0" is false; everything else, including the invalid
    /// sentinel, is not a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self.0.as_str() {
            TRUE_TEXT => Some(true),
            FALSE_TEXT => Some(false),
            _ => None,
        }
    }

    /// Parses "x,y". Extra components after the second are ignored.
    pub fn as_point(&self) -> Option<Point> {
        parse_point(&self.0)
    }

    /// Parses "AreaType:distance" with an optional trailing ":x,y" center
    pub fn as_area(&self) -> Option<Area> {
        if !self.0.contains(':') {
            return None;
        }

        let mut split = self.0.split(':');
        let area_type = split.next()?;
        let distance = split.next()?.trim().parse::<i32>().ok()?;
        let center = split.next().and_then(parse_point);

        Some(Area {
            area_type: area_type.to_string(),
            distance,
            center,
        })
    }

    /// Human readable rendering used by the debug inspector
    pub fn describe(&self, data_type: DataType) -> String {
        if data_type != DataType::Bool {
            return self.0.clone();
        }
        match self.as_bool() {
            Some(true) => "True".to_string(),
            Some(false) => "False".to_string(),
            None => "Disconnected".to_string(),
        }
    }
}

fn parse_point(input: &str) -> Option<Point> {
    if !input.contains(',') {
        return None;
    }

    let mut split = input.split(',');
    let x = split.next()?.trim().parse::<i32>().ok()?;
    let y = split.next()?.trim().parse::<i32>().ok()?;
    Some(Point::new(x, y))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A parsed area value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Area {
    pub area_type: String,
    pub distance: i32,
    pub center: Option<Point>,
}
