use std::io::{Stdout, Write};

use crate::{ConfigErr, Finished, Producer, ProducerBase, ProducerOptions};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// What happens to the messages still queued when a Stop signal is observed.
pub enum StopPolicy {
    /// Write them out before terminating.
    #[default]
    Drain,
    /// Discard them.
    Abandon,
}

/// Destination of framed messages. Implemented by concrete output stages.
pub trait Sink: Send {
    type Error: std::error::Error;

    /// Write one framed message.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Rotate the underlying resource. Does nothing by default.
    fn roll(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn stop_policy(&self) -> StopPolicy {
        StopPolicy::Drain
    }

    /// Called once, after the last write.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug)]
/// Writes framed messages to any [`std::io::Write`]. Rolling flushes the writer.
pub struct WriterSink<W: Write + Send> {
    writer: W,
    policy: StopPolicy,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            policy: StopPolicy::Drain,
        }
    }

    pub fn set_stop_policy(&mut self, policy: StopPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    type Error = std::io::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.writer.write_all(bytes)
    }

    fn roll(&mut self) -> Result<(), Self::Error> {
        self.writer.flush()
    }

    fn stop_policy(&self) -> StopPolicy {
        self.policy
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.writer.flush()
    }
}

#[derive(Debug)]
/// A complete producer writing to an [`std::io::Write`]: a [`ProducerBase`] composed with a
/// [`WriterSink`].
pub struct WriterProducer<W: Write + Send> {
    base: ProducerBase,
    sink: WriterSink<W>,
}

impl<W: Write + Send> WriterProducer<W> {
    pub fn new(options: &ProducerOptions, writer: W) -> Result<Self, ConfigErr> {
        Ok(Self::with_base(ProducerBase::new(options)?, writer))
    }

    pub fn with_base(base: ProducerBase, writer: W) -> Self {
        Self {
            base,
            sink: WriterSink::new(writer),
        }
    }

    pub fn sink_mut(&mut self) -> &mut WriterSink<W> {
        &mut self.sink
    }

    /// Run until stopped, then hand back the writer.
    pub async fn run(self) -> Result<Finished<WriterSink<W>>, std::io::Error> {
        let Self { base, sink } = self;
        base.run(sink).await
    }
}

impl WriterProducer<Stdout> {
    /// A console producer.
    pub fn stdout(options: &ProducerOptions) -> Result<Self, ConfigErr> {
        Self::new(options, std::io::stdout())
    }
}

impl<W: Write + Send> Producer for WriterProducer<W> {
    fn base(&self) -> &ProducerBase {
        &self.base
    }
}
