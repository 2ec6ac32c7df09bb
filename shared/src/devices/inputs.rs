use crate::{
    devices::{registry::DeviceKind, source_device},
    geometry::Point,
    graph::{
        device::Device,
        evaluation::{DeviceContext, Evaluate},
        pin::PinDesign,
    },
    value::{DataType, Value},
};

/// Emits its `Value` setting verbatim
struct SettingSource;

impl Evaluate for SettingSource {
    fn output(&self, context: &mut DeviceContext) -> Value {
        Value::text(context.setting("Value").unwrap_or(""))
    }
}

pub struct BooleanConstant;

impl DeviceKind for BooleanConstant {
    const KIND: &'static str = "BooleanConstant";

    fn build() -> Device {
        source_device(Self::KIND, "Constant Boolean", DataType::Bool)
            .with_setting("Value", "0")
            .with_evaluator(SettingSource)
    }
}

pub struct IntegerConstant;

impl DeviceKind for IntegerConstant {
    const KIND: &'static str = "IntegerConstant";

    fn build() -> Device {
        source_device(Self::KIND, "Constant Integer", DataType::Int)
            .with_setting("Value", "0")
            .with_evaluator(SettingSource)
    }
}

pub struct StringConstant;

impl DeviceKind for StringConstant {
    const KIND: &'static str = "StringConstant";

    fn build() -> Device {
        source_device(Self::KIND, "Constant String", DataType::String)
            .with_setting("Value", "")
            .with_evaluator(SettingSource)
    }
}

/// Emits the point in its `Value` setting, or its own anchor while unset
pub struct PointConstant;

impl DeviceKind for PointConstant {
    const KIND: &'static str = "PointConstant";

    fn build() -> Device {
        source_device(Self::KIND, "Constant Point", DataType::Point)
            .with_setting("Value", "")
            .with_evaluator(Self)
    }
}

impl Evaluate for PointConstant {
    fn output(&self, context: &mut DeviceContext) -> Value {
        let setting = Value::text(context.setting("Value").unwrap_or(""));
        if setting.is_empty() {
            return Value::from_point(context.anchor());
        }
        match setting.as_point() {
            Some(point) => Value::from_point(point),
            None => Value::empty(),
        }
    }
}

/// A fresh integer in 0..=Max on every read
pub struct RandomInt;

impl DeviceKind for RandomInt {
    const KIND: &'static str = "RandomInt";

    fn build() -> Device {
        source_device(Self::KIND, "Random Integer", DataType::Int)
            .with_setting("Max", "10")
            .with_evaluator(Self)
    }
}

impl Evaluate for RandomInt {
    fn output(&self, context: &mut DeviceContext) -> Value {
        let max = Value::text(context.setting("Max").unwrap_or("")).as_int();
        match max {
            Some(max) if max >= 0 => Value::from_int(fastrand::i32(0..=max)),
            _ => Value::invalid(),
        }
    }
}

/// Describes an area of `AreaType` around the `Point` input, or around the
/// device itself while that input is disconnected
pub struct AreaInput;

impl AreaInput {
    pub const AREA_TYPES: [&'static str; 2] = ["Square", "Circle"];
}

impl DeviceKind for AreaInput {
    const KIND: &'static str = "AreaInput";

    fn build() -> Device {
        Device::new(Self::KIND, "Area Input", 2, 3, Point::new(1, 1))
            .with_pin(PinDesign::input(0, Point::new(1, 0), DataType::Int).named("Distance"))
            .with_pin(PinDesign::input(1, Point::new(0, 1), DataType::Point).named("Point"))
            .with_pin(PinDesign::output(0, Point::new(1, 2), DataType::Area).named("Area"))
            .with_setting("AreaType", Self::AREA_TYPES[0])
            .with_evaluator(Self)
    }
}

impl Evaluate for AreaInput {
    fn output(&self, context: &mut DeviceContext) -> Value {
        let Some(distance) = context.input_named("Distance").and_then(|value| value.as_int()) else {
            return Value::empty();
        };
        let center = context
            .input_named("Point")
            .and_then(|value| value.as_point())
            .unwrap_or_else(|| context.anchor());
        let area_type = context.setting("AreaType").unwrap_or(Self::AREA_TYPES[0]);

        Value::text(format!("{}:{}:{}", area_type, distance, center))
    }
}
