use thiserror::Error;

/// Errors raised while building or querying a DeviceRegistry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registry is locked and cannot be modified
    #[error("Device registry is already locked and cannot be modified")]
    AlreadyLocked,

    /// The requested kind was never registered
    #[error("Unknown device kind: {kind}")]
    UnknownDeviceKind { kind: String },
}
