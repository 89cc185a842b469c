use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Out-of-band instruction to a producer. Never carries payload.
pub enum ProducerControl {
    /// Terminate the producer's worker.
    Stop,
    /// Rotate the underlying resource, e.g. reopen a log file.
    Roll,
}

impl Display for ProducerControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => write!(f, "stop"),
            Self::Roll => write!(f, "roll"),
        }
    }
}
