use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Drops and does not relay a Place whose footprint is blocked. When
    /// false, the device is placed anyway and a warning is logged.
    pub reject_blocked_placement: bool,
    /// Relays trip-wire notifications to every peer. When false, a trip
    /// wire goes back to its origin only.
    pub relay_trip_wire: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            reject_blocked_placement: false,
            relay_trip_wire: true,
        }
    }
}
