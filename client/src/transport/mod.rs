cfg_if! {
    if #[cfg(feature = "transport_channel")] {
        pub mod channel;
    } else {}
}

pub use inner::{PacketReceiver, PacketSender, RecvError, SendError};

mod inner {

    pub struct SendError;

    pub struct RecvError;

    pub trait PacketSender: Send + Sync {
        /// Sends a packet to the authority
        fn send(&self, payload: &[u8]) -> Result<(), SendError>;
    }

    pub trait PacketReceiver: Send + Sync {
        /// Receives the next packet from the authority
        fn receive(&mut self) -> Result<Option<&[u8]>, RecvError>;
    }
}
