use thiserror::Error;

use wirenet_shared::{ApplyError, OperationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WirenetClientError {
    /// No transport attached yet
    #[error("Client is not connected")]
    NotConnected,

    /// Transport refused an outgoing packet
    #[error("Error while sending packet to the authority")]
    SendError,

    /// Transport failed while receiving
    #[error("Error while receiving from transport")]
    RecvError,

    /// A packet from the authority could not be decoded
    #[error("Cannot read packet from the authority: {0}")]
    Decode(OperationError),

    /// A local intent did not apply, so it was not sent
    #[error(transparent)]
    Apply(#[from] ApplyError),
}
