use crate::{
    devices::{registry::DeviceKind, two_input_device},
    graph::{
        device::Device,
        evaluation::{DeviceContext, Evaluate},
    },
    value::{DataType, Value},
};

/// Joins In0 and In1. A disconnected side contributes nothing.
pub struct Concat;

impl DeviceKind for Concat {
    const KIND: &'static str = "Concat";

    fn build() -> Device {
        two_input_device(Self::KIND, "Concat", DataType::String, DataType::String)
            .with_evaluator(Self)
    }
}

impl Evaluate for Concat {
    fn output(&self, context: &mut DeviceContext) -> Value {
        let mut joined = context.input(0).map(Value::into_string).unwrap_or_default();
        if let Some(right) = context.input(1) {
            joined.push_str(right.as_str());
        }
        Value::text(joined)
    }
}
