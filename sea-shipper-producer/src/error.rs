use sea_shipper_types::{Message, ProducerControl, StreamKeyErr};
use thiserror::Error;

#[derive(Error, Debug)]
/// A producer could not be configured. Construction is aborted.
pub enum ConfigErr {
    #[error("Buffer must be a positive integer, got {0}")]
    InvalidBuffer(usize),
    #[error("Invalid filter pattern: {0}")]
    InvalidFilter(#[source] regex::Error),
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestampFormat(String),
    #[error("StreamKeyErr {0}")]
    StreamKeyErr(#[from] StreamKeyErr),
}

#[derive(Error, Debug)]
/// The message could not be enqueued. It is handed back to the caller.
pub enum SendErr {
    #[error("Intake queue is full")]
    Full(Message),
    #[error("Producer has stopped")]
    Disconnected(Message),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlErr {
    /// A previous signal has not been picked up yet. Signals are never queued or merged.
    #[error("Control signal `{0}` rejected: a signal is already pending")]
    Full(ProducerControl),
    #[error("Control signal `{0}` rejected: producer has stopped")]
    Disconnected(ProducerControl),
}

impl SendErr {
    pub fn into_inner(self) -> Message {
        match self {
            Self::Full(message) | Self::Disconnected(message) => message,
        }
    }
}
