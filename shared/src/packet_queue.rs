use smol::channel::{self, Receiver, Sender, TryRecvError};

/// The other half of a packet queue was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueClosed;

/// An unbounded in-process queue of packets. Both server and client channel
/// transports are built on it.
pub fn packet_queue<P>() -> (PacketQueueSender<P>, PacketQueueReceiver<P>) {
    let (sender, receiver) = channel::unbounded();
    (
        PacketQueueSender { sender },
        PacketQueueReceiver {
            receiver,
            current: None,
        },
    )
}

#[derive(Clone)]
pub struct PacketQueueSender<P> {
    sender: Sender<P>,
}

impl<P> PacketQueueSender<P> {
    pub fn push(&self, packet: P) -> Result<(), QueueClosed> {
        self.sender.send_blocking(packet).map_err(|_| QueueClosed)
    }
}

/// Receiving half. Holds on to the last packet so callers can borrow it.
pub struct PacketQueueReceiver<P> {
    receiver: Receiver<P>,
    current: Option<P>,
}

impl<P> PacketQueueReceiver<P> {
    /// The next packet, or None when the queue is empty
    pub fn pop(&mut self) -> Result<Option<&P>, QueueClosed> {
        match self.receiver.try_recv() {
            Ok(packet) => Ok(Some(&*self.current.insert(packet))),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(QueueClosed),
        }
    }
}
