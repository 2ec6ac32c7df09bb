use thiserror::Error;

use wirenet_shared::{OperationError, ParticipantId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WirenetServerError {
    /// Transport failed while receiving
    #[error("Error while receiving from transport")]
    RecvError,

    /// Transport refused a packet for a participant
    #[error("Error while sending packet to {to}")]
    SendError { to: ParticipantId },

    /// A packet could not be decoded into an operation
    #[error("Cannot read packet from {from}: {error}")]
    Decode {
        from: ParticipantId,
        error: OperationError,
    },

    /// A packet or snapshot request named a participant that is not connected
    #[error("Unknown user {id}")]
    UnknownUser { id: ParticipantId },

    /// An intent was issued before `listen` was called
    #[error("Server is not listening")]
    NotListening,
}
