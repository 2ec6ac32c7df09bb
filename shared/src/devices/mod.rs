pub mod comparison;
pub mod error;
pub mod inputs;
pub mod logic;
pub mod maths;
pub mod outputs;
pub mod registry;
pub mod text;

use crate::{
    geometry::Point,
    graph::{device::Device, pin::PinDesign},
    value::DataType,
};

use comparison::{Equals, GreaterThan, LessThan};
use inputs::{AreaInput, BooleanConstant, IntegerConstant, PointConstant, RandomInt, StringConstant};
use logic::{AndGate, If, NotGate, OrGate};
use maths::{Add, Divide, Modulo, Multiply, Subtract};
use outputs::OutputLamp;
use registry::{DeviceRegistry, RegistryPlugin};
use text::Concat;

/// Registers every built-in device kind
pub struct StandardDevicesPlugin;

impl RegistryPlugin for StandardDevicesPlugin {
    fn build(&self, registry: &mut DeviceRegistry) {
        registry
            // Logic
            .add_device::<AndGate>()
            .add_device::<OrGate>()
            .add_device::<NotGate>()
            .add_device::<If>()
            // Maths
            .add_device::<Add>()
            .add_device::<Subtract>()
            .add_device::<Multiply>()
            .add_device::<Divide>()
            .add_device::<Modulo>()
            // Comparison
            .add_device::<Equals>()
            .add_device::<LessThan>()
            .add_device::<GreaterThan>()
            // Inputs
            .add_device::<BooleanConstant>()
            .add_device::<IntegerConstant>()
            .add_device::<StringConstant>()
            .add_device::<PointConstant>()
            .add_device::<RandomInt>()
            .add_device::<AreaInput>()
            // Text
            .add_device::<Concat>()
            // Outputs
            .add_device::<OutputLamp>();
    }
}

/// 3x2 body anchored on the top middle cell: inputs on the top corners, the
/// output centered below
pub(crate) fn two_input_device(
    kind: &'static str,
    name: &'static str,
    input_type: DataType,
    output_type: DataType,
) -> Device {
    Device::new(kind, name, 3, 2, Point::new(1, 0))
        .with_pin(PinDesign::input(0, Point::new(0, 0), input_type))
        .with_pin(PinDesign::input(1, Point::new(2, 0), input_type))
        .with_pin(PinDesign::output(0, Point::new(1, 1), output_type))
}

/// 1x1 body with a single output
pub(crate) fn source_device(kind: &'static str, name: &'static str, output_type: DataType) -> Device {
    Device::new(kind, name, 1, 1, Point::new(0, 0))
        .with_pin(PinDesign::output(0, Point::new(0, 0), output_type))
}
