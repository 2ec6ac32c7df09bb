use crate::{
    devices::{registry::DeviceKind, two_input_device},
    geometry::Point,
    graph::{
        device::Device,
        evaluation::{DeviceContext, Evaluate},
        pin::PinDesign,
    },
    value::{DataType, Value},
};

fn bool_input(context: &mut DeviceContext, index: usize) -> Option<bool> {
    context.input(index)?.as_bool()
}

fn gate(context: &mut DeviceContext, op: fn(bool, bool) -> bool) -> Value {
    match (bool_input(context, 0), bool_input(context, 1)) {
        (Some(a), Some(b)) => Value::from_bool(op(a, b)),
        _ => Value::invalid(),
    }
}

pub struct AndGate;

impl DeviceKind for AndGate {
    const KIND: &'static str = "AndGate";

    fn build() -> Device {
        two_input_device(Self::KIND, "AND Gate", DataType::Bool, DataType::Bool).with_evaluator(Self)
    }
}

impl Evaluate for AndGate {
    fn output(&self, context: &mut DeviceContext) -> Value {
        gate(context, |a, b| a && b)
    }
}

pub struct OrGate;

impl DeviceKind for OrGate {
    const KIND: &'static str = "OrGate";

    fn build() -> Device {
        two_input_device(Self::KIND, "OR Gate", DataType::Bool, DataType::Bool).with_evaluator(Self)
    }
}

impl Evaluate for OrGate {
    fn output(&self, context: &mut DeviceContext) -> Value {
        gate(context, |a, b| a || b)
    }
}

/// 1x2, input on top, output below
pub struct NotGate;

impl DeviceKind for NotGate {
    const KIND: &'static str = "NotGate";

    fn build() -> Device {
        Device::new(Self::KIND, "NOT Gate", 1, 2, Point::new(0, 0))
            .with_pin(PinDesign::input(0, Point::new(0, 0), DataType::Bool))
            .with_pin(PinDesign::output(0, Point::new(0, 1), DataType::Bool))
            .with_evaluator(Self)
    }
}

impl Evaluate for NotGate {
    fn output(&self, context: &mut DeviceContext) -> Value {
        match bool_input(context, 0) {
            Some(value) => Value::from_bool(!value),
            None => Value::invalid(),
        }
    }
}

/// Passes `Value` through while `Condition` is true, outputs nothing while it
/// is false
pub struct If;

impl DeviceKind for If {
    const KIND: &'static str = "If";

    fn build() -> Device {
        Device::new(Self::KIND, "If", 3, 2, Point::new(1, 0))
            .with_pin(PinDesign::input(0, Point::new(0, 0), DataType::Bool).named("Condition"))
            .with_pin(PinDesign::input(1, Point::new(2, 0), DataType::String).named("Value"))
            .with_pin(PinDesign::output(0, Point::new(1, 1), DataType::String))
            .with_evaluator(Self)
    }
}

impl Evaluate for If {
    fn output(&self, context: &mut DeviceContext) -> Value {
        match bool_input(context, 0) {
            Some(true) => context.input(1).unwrap_or_else(Value::empty),
            Some(false) => Value::empty(),
            None => Value::invalid(),
        }
    }
}
