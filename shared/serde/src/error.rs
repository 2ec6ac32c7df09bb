use thiserror::Error;

/// The error returned when a value cannot be read back out of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to deserialize value from byte buffer")]
pub struct SerdeErr;
