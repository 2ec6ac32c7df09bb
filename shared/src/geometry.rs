use std::ops::{Add, Sub};

use wirenet_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

/// An integer grid coordinate in world space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Serde for Point {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let x = i32::de(reader)?;
        let y = i32::de(reader)?;
        Ok(Self { x, y })
    }

    fn byte_length(&self) -> usize {
        8
    }
}

/// An axis-aligned block of grid cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.x + self.width
            && self.x < other.x + other.width
            && other.y < self.y + self.height
            && self.y < other.y + other.height
    }

    /// Every cell covered by this rect, row by row
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |cell_y| (x..x + width).map(move |cell_x| Point::new(cell_x, cell_y)))
    }
}
