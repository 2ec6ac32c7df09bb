use crate::geometry::Rect;

/// The world a circuit is embedded in, as seen by the graph.
///
/// Terrain lookups gate placement and trip-wire notifications are forwarded
/// here. Rendering never goes through this trait.
pub trait WorldQuery: Send {
    /// Whether terrain inside `area` leaves room for a device
    fn is_area_free(&self, _area: &Rect) -> bool {
        true
    }

    /// Fires the world's own wiring at the given cell
    fn trip_wire(&mut self, _x: i32, _y: i32) {}
}

/// A world with no terrain and no wiring of its own
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenWorld;

impl WorldQuery for OpenWorld {}
