use flume::{Sender, TrySendError};
use sea_shipper_types::{Message, ProducerControl};

use crate::{ControlErr, SendErr};

#[derive(Debug, Clone)]
/// Write-only end of a producer's intake queue. Given to the router.
pub struct IntakeHandle {
    sender: Sender<Message>,
}

#[derive(Debug, Clone)]
/// Write-only end of a producer's control channel. Given to the supervisor.
pub struct ControlHandle {
    sender: Sender<ProducerControl>,
}

impl IntakeHandle {
    pub(crate) fn new(sender: Sender<Message>) -> Self {
        Self { sender }
    }

    /// Enqueue a message. Blocks while the queue is full.
    pub fn send(&self, message: Message) -> Result<(), SendErr> {
        self.sender
            .send(message)
            .map_err(|e| SendErr::Disconnected(e.into_inner()))
    }

    /// Enqueue a message, waiting asynchronously while the queue is full.
    pub async fn send_async(&self, message: Message) -> Result<(), SendErr> {
        self.sender
            .send_async(message)
            .await
            .map_err(|e| SendErr::Disconnected(e.into_inner()))
    }

    /// Enqueue a message if there is room. Never blocks.
    pub fn try_send(&self, message: Message) -> Result<(), SendErr> {
        self.sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(message) => SendErr::Full(message),
            TrySendError::Disconnected(message) => SendErr::Disconnected(message),
        })
    }

    /// Number of messages waiting in the queue.
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.sender.capacity()
    }
}

impl ControlHandle {
    pub(crate) fn new(sender: Sender<ProducerControl>) -> Self {
        Self { sender }
    }

    /// Deliver a control signal. Never blocks: if the previous signal has not been picked up,
    /// this one is rejected with [`ControlErr::Full`].
    pub fn send(&self, signal: ProducerControl) -> Result<(), ControlErr> {
        self.sender.try_send(signal).map_err(|e| match e {
            TrySendError::Full(signal) => ControlErr::Full(signal),
            TrySendError::Disconnected(signal) => ControlErr::Disconnected(signal),
        })
    }

    pub fn stop(&self) -> Result<(), ControlErr> {
        self.send(ProducerControl::Stop)
    }

    pub fn roll(&self) -> Result<(), ControlErr> {
        self.send(ProducerControl::Roll)
    }
}
