use thiserror::Error;

use crate::graph::pin::PinRole;

/// Errors raised by GraphStore lookups and edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No device covers the given cell
    #[error("No device found at: x {x}, y {y}")]
    NoDeviceAt { x: i32, y: i32 },

    /// No pin sits exactly on the given cell
    #[error("No pin found at: x {x}, y {y}")]
    NoPinAt { x: i32, y: i32 },

    /// A key that no longer refers to a live device
    #[error("Device key does not refer to a placed device")]
    DeviceNotFound,

    /// A key that no longer refers to a live pin
    #[error("Pin key does not refer to a placed pin")]
    PinNotFound,

    /// Both ends of a connection have the same role
    #[error("Cannot connect two {role} pins; a wire joins one output to one input")]
    IncompatiblePins { role: PinRole },

    /// Both ends of a connection are the same pin
    #[error("Cannot connect a pin to itself")]
    SelfConnection,
}
