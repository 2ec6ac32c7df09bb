cfg_if! {
    if #[cfg(feature = "transport_channel")] {
        pub mod channel;
    } else {}
}

pub use inner::{PacketReceiver, PacketSender, RecvError, SendError};

mod inner {

    use wirenet_shared::ParticipantId;

    pub struct SendError;

    pub struct RecvError;

    pub trait PacketSender: Send + Sync {
        /// Sends a packet to the given participant
        fn send(&self, to: &ParticipantId, payload: &[u8]) -> Result<(), SendError>;
    }

    pub trait PacketReceiver: Send + Sync {
        /// Receives the next packet, tagged with the participant it came from
        fn receive(&mut self) -> Result<Option<(ParticipantId, &[u8])>, RecvError>;
    }
}
