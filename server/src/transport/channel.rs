use wirenet_shared::{packet_queue, PacketQueueReceiver, PacketQueueSender, ParticipantId};

use super::{
    PacketReceiver as TransportReceiver, PacketSender as TransportSender, RecvError, SendError,
};

type Packet = (ParticipantId, Box<[u8]>);

/// In-process transport over an unbounded packet queue. Each packet carries
/// the peer it is addressed to or came from.
pub struct PacketChannel;

impl PacketChannel {
    pub fn unbounded() -> (Box<dyn TransportSender>, Box<dyn TransportReceiver>) {
        let (packet_sender, packet_receiver) = packet_queue::<Packet>();
        (Box::new(packet_sender), Box::new(packet_receiver))
    }
}

impl TransportSender for PacketQueueSender<Packet> {
    fn send(&self, to: &ParticipantId, payload: &[u8]) -> Result<(), SendError> {
        self.push((*to, payload.into())).map_err(|_| SendError)
    }
}

impl TransportReceiver for PacketQueueReceiver<Packet> {
    fn receive(&mut self) -> Result<Option<(ParticipantId, &[u8])>, RecvError> {
        match self.pop() {
            Ok(Some((from, payload))) => Ok(Some((*from, &payload[..]))),
            Ok(None) => Ok(None),
            Err(_) => Err(RecvError),
        }
    }
}
