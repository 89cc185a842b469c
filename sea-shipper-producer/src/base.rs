use flume::{bounded, Receiver, Sender};
use std::sync::Arc;

use sea_shipper_types::{Message, ProducerControl, Streams};

use crate::{
    ConfigErr, ControlHandle, Diagnostics, Filter, Finished, IntakeHandle, LogDiagnostics,
    MessageFormat, ProducerOptions, Sink, Worker,
};

/// The control channel holds at most one pending signal.
pub const CONTROL_CAPACITY: usize = 1;

#[derive(Debug)]
/// State shared by every output stage: the intake queue, the control channel, the acceptance
/// filter and the message format.
///
/// A `ProducerBase` performs no I/O. Hand out its handles, then turn it into a [`Worker`]
/// (or call [`ProducerBase::run`]) to start consuming.
pub struct ProducerBase {
    intake: Sender<Message>,
    messages: Receiver<Message>,
    control: Sender<ProducerControl>,
    signals: Receiver<ProducerControl>,
    filter: Option<Filter>,
    format: MessageFormat,
    streams: Streams,
    diagnostics: Arc<dyn Diagnostics>,
}

/// The capabilities a concrete producer exposes to the pipeline. Implementors own a
/// [`ProducerBase`] and only need to provide [`Producer::base`].
pub trait Producer {
    fn base(&self) -> &ProducerBase;

    fn accepts(&self, message: &Message) -> bool {
        self.base().accepts(message)
    }

    fn intake_handle(&self) -> IntakeHandle {
        self.base().intake_handle()
    }

    fn control_handle(&self) -> ControlHandle {
        self.base().control_handle()
    }

    fn streams(&self) -> &Streams {
        self.base().streams()
    }
}

impl ProducerBase {
    /// Build a producer base, reporting to the `log` facade.
    pub fn new(options: &ProducerOptions) -> Result<Self, ConfigErr> {
        Self::with_diagnostics(options, Arc::new(LogDiagnostics))
    }

    /// Build a producer base. Fails if the buffer is zero, the filter pattern does not compile
    /// or the timestamp format is invalid; the error is also reported to `diagnostics`.
    pub fn with_diagnostics(
        options: &ProducerOptions,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self, ConfigErr> {
        let (format, filter) = match resolve(options) {
            Ok(resolved) => resolved,
            Err(err) => {
                diagnostics.config_error(&err);
                return Err(err);
            }
        };
        let (intake, messages) = bounded(options.buffer());
        let (control, signals) = bounded(CONTROL_CAPACITY);

        Ok(Self {
            intake,
            messages,
            control,
            signals,
            filter,
            format,
            streams: options.streams().clone(),
            diagnostics,
        })
    }

    /// True if no filter is configured, otherwise true iff the filter matches the payload.
    pub fn accepts(&self, message: &Message) -> bool {
        accepts(self.filter.as_ref(), message)
    }

    pub fn intake_handle(&self) -> IntakeHandle {
        IntakeHandle::new(self.intake.clone())
    }

    pub fn control_handle(&self) -> ControlHandle {
        ControlHandle::new(self.control.clone())
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn format(&self) -> &MessageFormat {
        &self.format
    }

    pub fn diagnostics(&self) -> &Arc<dyn Diagnostics> {
        &self.diagnostics
    }

    /// Give up the sending ends and keep only what the consuming task needs. Once every handle
    /// is dropped the worker observes the queue as closed.
    pub fn into_worker(self) -> Worker {
        let Self {
            messages,
            signals,
            filter,
            format,
            diagnostics,
            ..
        } = self;
        Worker::new(messages, signals, filter, format, diagnostics)
    }

    /// Consume messages into `sink` until stopped. See [`Worker::run`].
    pub async fn run<S: Sink>(self, sink: S) -> Result<Finished<S>, S::Error> {
        self.into_worker().run(sink).await
    }
}

impl Producer for ProducerBase {
    fn base(&self) -> &ProducerBase {
        self
    }
}

fn resolve(options: &ProducerOptions) -> Result<(MessageFormat, Option<Filter>), ConfigErr> {
    if options.buffer() == 0 {
        return Err(ConfigErr::InvalidBuffer(options.buffer()));
    }
    let format = MessageFormat::from_options(options)?;
    let filter = options.filter().map(Filter::new).transpose()?;
    Ok((format, filter))
}

pub(crate) fn accepts(filter: Option<&Filter>, message: &Message) -> bool {
    match filter {
        Some(filter) => filter.is_match(message.payload()),
        None => true,
    }
}
