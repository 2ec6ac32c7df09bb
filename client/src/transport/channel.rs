use wirenet_shared::{packet_queue, PacketQueueReceiver, PacketQueueSender};

use super::{
    PacketReceiver as TransportReceiver, PacketSender as TransportSender, RecvError, SendError,
};

type Packet = Box<[u8]>;

/// In-process transport to the authority over an unbounded packet queue
pub struct PacketChannel;

impl PacketChannel {
    pub fn unbounded() -> (Box<dyn TransportSender>, Box<dyn TransportReceiver>) {
        let (packet_sender, packet_receiver) = packet_queue::<Packet>();
        (Box::new(packet_sender), Box::new(packet_receiver))
    }
}

impl TransportSender for PacketQueueSender<Packet> {
    fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        self.push(payload.into()).map_err(|_| SendError)
    }
}

impl TransportReceiver for PacketQueueReceiver<Packet> {
    fn receive(&mut self) -> Result<Option<&[u8]>, RecvError> {
        match self.pop() {
            Ok(Some(payload)) => Ok(Some(&payload[..])),
            Ok(None) => Ok(None),
            Err(_) => Err(RecvError),
        }
    }
}
