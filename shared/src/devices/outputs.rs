use crate::{
    devices::registry::DeviceKind,
    geometry::Point,
    graph::{
        device::Device,
        graph_store::GraphStore,
        keys::DeviceKey,
        pin::{PinDesign, PinRole},
    },
    value::DataType,
};

/// A lamp with one bool input and no outputs
pub struct OutputLamp;

impl OutputLamp {
    /// Whether the lamp's input currently reads true
    pub fn is_lit(graph: &GraphStore, device: &DeviceKey) -> bool {
        let Some(pin) = graph.device_pin(device, PinRole::In, 0) else {
            return false;
        };
        graph.pin_value(&pin).as_bool() == Some(true)
    }
}

impl DeviceKind for OutputLamp {
    const KIND: &'static str = "OutputLamp";

    fn build() -> Device {
        Device::new(Self::KIND, "Output Lamp", 1, 1, Point::new(0, 0))
            .with_pin(PinDesign::input(0, Point::new(0, 0), DataType::Bool))
    }
}
