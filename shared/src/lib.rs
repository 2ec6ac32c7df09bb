//! # Wirenet Shared
//! The circuit graph, device catalog and operation codec shared between
//! wirenet-server & wirenet-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use wirenet_serde::{ByteReader, ByteWrite, ByteWriter, Serde, SerdeErr, VarLength};

mod bigmap;
mod devices;
mod geometry;
mod graph;
mod protocol;
mod replica;
mod types;
mod value;
mod world_query;

pub use bigmap::{BigMap, BigMapKey};
pub use devices::{
    comparison::{Equals, GreaterThan, LessThan},
    error::RegistryError,
    inputs::{AreaInput, BooleanConstant, IntegerConstant, PointConstant, RandomInt, StringConstant},
    logic::{AndGate, If, NotGate, OrGate},
    maths::{Add, Divide, Modulo, Multiply, Subtract},
    outputs::OutputLamp,
    registry::{DeviceKind, DeviceRegistry, RegistryPlugin},
    text::Concat,
    StandardDevicesPlugin,
};
pub use geometry::{Point, Rect};
pub use graph::{
    config::GraphConfig,
    device::{Device, PlacedDevice, Settings},
    error::GraphError,
    evaluation::{DeviceContext, Evaluate, Evaluation},
    graph_store::GraphStore,
    keys::{DeviceKey, PinKey, WireKey},
    pin::{Pin, PinDesign, PinLinks, PinRole},
    wire::{Wire, WireDraft},
};
pub use protocol::{snapshot_operations, GraphOperation, Opcode, OperationError};
pub use replica::{ApplyError, Replica};
pub use types::ParticipantId;
pub use value::{Area, DataType, Value};
pub use world_query::{OpenWorld, WorldQuery};

cfg_if! {
    if #[cfg(feature = "transport_channel")] {
        mod packet_queue;
        pub use packet_queue::{packet_queue, PacketQueueReceiver, PacketQueueSender, QueueClosed};
    } else {}
}
