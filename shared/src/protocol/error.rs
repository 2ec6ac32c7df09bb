use thiserror::Error;

use crate::protocol::Opcode;

/// Errors that can occur while decoding an operation packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Packet carried no bytes at all
    #[error("Received an empty packet")]
    Empty,

    /// Leading byte is not one of the seven opcodes
    #[error("Unknown opcode {opcode}")]
    UnknownOpcode { opcode: u8 },

    /// Payload was truncated, carried a negative count, or held invalid UTF-8
    #[error("Malformed {opcode} payload")]
    Malformed { opcode: Opcode },

    /// Payload decoded but bytes were left over
    #[error("{count} trailing bytes after {opcode} payload")]
    TrailingBytes { opcode: Opcode, count: usize },
}
