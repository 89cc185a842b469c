use std::fmt::Debug;

use sea_shipper_types::{Message, ProducerControl};

use crate::{ConfigErr, WorkerStats};

/// Receives the noteworthy events of a producer. Supplied by whoever builds the producer, so
/// that nothing in here depends on a process-wide logger.
///
/// Every method defaults to doing nothing.
pub trait Diagnostics: Debug + Send + Sync {
    /// Configuration was rejected. Called right before the error is returned to the caller.
    fn config_error(&self, _err: &ConfigErr) {}

    fn control_received(&self, _signal: ProducerControl) {}

    /// The acceptance filter did not match the message.
    fn message_rejected(&self, _message: &Message) {}

    /// The sink failed; the worker stops after reporting.
    fn sink_error(&self, _err: &dyn std::error::Error) {}

    /// Queued messages were discarded, on Stop or because the sink failed.
    fn messages_abandoned(&self, _count: usize) {}

    fn worker_finished(&self, _stats: &WorkerStats) {}
}

#[derive(Debug, Default, Clone, Copy)]
/// Forwards every event to the `log` facade.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn config_error(&self, err: &ConfigErr) {
        log::error!("Producer configuration error: {err}");
    }

    fn control_received(&self, signal: ProducerControl) {
        log::debug!("Control signal: {signal}");
    }

    fn message_rejected(&self, message: &Message) {
        log::trace!(
            "Filtered out message on {} ({} bytes)",
            message.stream_key(),
            message.size()
        );
    }

    fn sink_error(&self, err: &dyn std::error::Error) {
        log::error!("Sink error: {err}");
    }

    fn messages_abandoned(&self, count: usize) {
        log::warn!("Abandoning {count} queued messages");
    }

    fn worker_finished(&self, stats: &WorkerStats) {
        log::debug!("Producer worker finished: {stats:?}");
    }
}
