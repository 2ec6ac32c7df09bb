use crate::{
    devices::{registry::DeviceKind, two_input_device},
    graph::{
        device::Device,
        evaluation::{DeviceContext, Evaluate},
    },
    value::{DataType, Value},
};

// Both inputs as integers, or None if either is disconnected or unparsable
fn int_pair(context: &mut DeviceContext) -> Option<(i32, i32)> {
    let a = context.input(0)?.as_int()?;
    let b = context.input(1)?.as_int()?;
    Some((a, b))
}

fn compare(context: &mut DeviceContext, op: fn(i32, i32) -> bool) -> Value {
    match int_pair(context) {
        Some((a, b)) => Value::from_bool(op(a, b)),
        None => Value::invalid(),
    }
}

/// "1" when In0 < In1, "0" otherwise, "-1" if either input is missing or not
/// an integer
pub struct LessThan;

impl DeviceKind for LessThan {
    const KIND: &'static str = "LessThan";

    fn build() -> Device {
        two_input_device(Self::KIND, "Less Than", DataType::Int, DataType::Bool).with_evaluator(Self)
    }
}

impl Evaluate for LessThan {
    fn output(&self, context: &mut DeviceContext) -> Value {
        compare(context, |a, b| a < b)
    }
}

pub struct GreaterThan;

impl DeviceKind for GreaterThan {
    const KIND: &'static str = "GreaterThan";

    fn build() -> Device {
        two_input_device(Self::KIND, "Greater Than", DataType::Int, DataType::Bool)
            .with_evaluator(Self)
    }
}

impl Evaluate for GreaterThan {
    fn output(&self, context: &mut DeviceContext) -> Value {
        compare(context, |a, b| a > b)
    }
}

/// Compares the raw text on both inputs
pub struct Equals;

impl DeviceKind for Equals {
    const KIND: &'static str = "Equals";

    fn build() -> Device {
        two_input_device(Self::KIND, "Equals", DataType::String, DataType::Bool).with_evaluator(Self)
    }
}

impl Evaluate for Equals {
    fn output(&self, context: &mut DeviceContext) -> Value {
        let (Some(a), Some(b)) = (context.input(0), context.input(1)) else {
            return Value::invalid();
        };
        Value::from_bool(a == b)
    }
}
