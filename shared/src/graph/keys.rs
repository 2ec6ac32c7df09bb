use crate::bigmap::BigMapKey;

// DeviceKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct DeviceKey(u64);

impl BigMapKey for DeviceKey {
    fn to_u64(&self) -> u64 {
        self.0
    }

    fn from_u64(value: u64) -> Self {
        DeviceKey(value)
    }
}

// PinKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct PinKey(u64);

impl BigMapKey for PinKey {
    fn to_u64(&self) -> u64 {
        self.0
    }

    fn from_u64(value: u64) -> Self {
        PinKey(value)
    }
}

// WireKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct WireKey(u64);

impl BigMapKey for WireKey {
    fn to_u64(&self) -> u64 {
        self.0
    }

    fn from_u64(value: u64) -> Self {
        WireKey(value)
    }
}
