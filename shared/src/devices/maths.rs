use crate::{
    devices::{registry::DeviceKind, two_input_device},
    graph::{
        device::Device,
        evaluation::{DeviceContext, Evaluate},
    },
    value::{DataType, Value},
};

// Applies `op` to both integer inputs. Missing or unparsable inputs, and an
// op returning None, yield "-1".
fn arithmetic(context: &mut DeviceContext, op: fn(i32, i32) -> Option<i32>) -> Value {
    let Some(a) = context.input(0).and_then(|value| value.as_int()) else {
        return Value::invalid();
    };
    let Some(b) = context.input(1).and_then(|value| value.as_int()) else {
        return Value::invalid();
    };
    match op(a, b) {
        Some(result) => Value::from_int(result),
        None => Value::invalid(),
    }
}

macro_rules! arithmetic_device {
    ($device:ident, $kind:literal, $name:literal, $op:expr) => {
        pub struct $device;

        impl DeviceKind for $device {
            const KIND: &'static str = $kind;

            fn build() -> Device {
                two_input_device(Self::KIND, $name, DataType::Int, DataType::Int).with_evaluator(Self)
            }
        }

        impl Evaluate for $device {
            fn output(&self, context: &mut DeviceContext) -> Value {
                arithmetic(context, $op)
            }
        }
    };
}

arithmetic_device!(Add, "Add", "Add", |a, b| Some(a.wrapping_add(b)));
arithmetic_device!(Subtract, "Subtract", "Subtract", |a, b| Some(a.wrapping_sub(b)));
arithmetic_device!(Multiply, "Multiply", "Multiply", |a, b| Some(a.wrapping_mul(b)));
arithmetic_device!(Divide, "Divide", "Divide", |a, b| {
    if b == 0 {
        None
    } else {
        Some(a.wrapping_div(b))
    }
});
arithmetic_device!(Modulo, "Modulo", "Modulo", |a, b| {
    if b == 0 {
        None
    } else {
        Some(a.wrapping_rem(b))
    }
});
