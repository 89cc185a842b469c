use flume::{Receiver, Selector, TryRecvError};
use futures::{future::Either, select_biased, FutureExt};
use std::sync::Arc;

use sea_shipper_types::{Message, ProducerControl};

use crate::{base::accepts, Diagnostics, Filter, MessageFormat, Sink, StopPolicy};

#[derive(Debug)]
/// The consuming side of a producer. Only the worker may receive from the intake queue.
pub struct Worker {
    /// `None` once the intake is closed on Stop or on a sink error.
    messages: Option<Receiver<Message>>,
    /// `None` once every control sender has been dropped.
    signals: Option<Receiver<ProducerControl>>,
    filter: Option<Filter>,
    format: MessageFormat,
    diagnostics: Arc<dyn Diagnostics>,
}

#[derive(Debug)]
pub enum Next {
    Message(Message),
    Control(ProducerControl),
    /// Every intake handle is gone and the queue is empty.
    Closed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Messages written to the sink, including those drained on stop.
    pub delivered: u64,
    /// Messages the acceptance filter turned away.
    pub rejected: u64,
    /// Messages written after Stop was observed.
    pub drained: u64,
    /// Messages discarded on Stop.
    pub abandoned: u64,
    pub rolled: u64,
}

#[derive(Debug)]
/// A worker that ran to completion.
pub struct Finished<S> {
    pub sink: S,
    pub stats: WorkerStats,
}

impl Worker {
    pub(crate) fn new(
        messages: Receiver<Message>,
        signals: Receiver<ProducerControl>,
        filter: Option<Filter>,
        format: MessageFormat,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            messages: Some(messages),
            signals: Some(signals),
            filter,
            format,
            diagnostics,
        }
    }

    pub fn accepts(&self, message: &Message) -> bool {
        accepts(self.filter.as_ref(), message)
    }

    pub fn format(&self) -> &MessageFormat {
        &self.format
    }

    /// Wait for the next control signal or message, whichever is ready first. A pending control
    /// signal always takes precedence over queued messages.
    pub async fn next(&mut self) -> Next {
        loop {
            let messages = match &self.messages {
                Some(messages) => messages,
                None => return Next::Closed,
            };
            let signals = match &self.signals {
                Some(signals) => signals,
                None => return messages.recv_async().await.into(),
            };
            let res = select_biased! {
                signal = signals.recv_async().fuse() => Either::Left(signal),
                message = messages.recv_async().fuse() => Either::Right(message),
            };
            match res {
                Either::Left(Ok(signal)) => return Next::Control(signal),
                Either::Left(Err(_)) => self.signals = None,
                Either::Right(message) => return message.into(),
            }
        }
    }

    /// Blocking variant of [`Worker::next`], for callers without an async runtime.
    pub fn next_blocking(&mut self) -> Next {
        loop {
            let messages = match &self.messages {
                Some(messages) => messages,
                None => return Next::Closed,
            };
            let signals = match &self.signals {
                Some(signals) => signals,
                None => return messages.recv().into(),
            };
            match signals.try_recv() {
                Ok(signal) => return Next::Control(signal),
                Err(TryRecvError::Disconnected) => {
                    self.signals = None;
                    continue;
                }
                Err(TryRecvError::Empty) => (),
            }
            let selected = Selector::new()
                .recv(signals, |signal| signal.ok().map(Next::Control))
                .recv(messages, |message| Some(message.into()))
                .wait();
            match selected {
                Some(next) => return next,
                None => self.signals = None,
            }
        }
    }

    /// Take every message queued at this instant and close the intake. From then on senders
    /// get their message back in [`SendErr::Disconnected`](crate::SendErr::Disconnected), and
    /// so do senders still blocked on a full queue.
    pub fn close(&mut self) -> Vec<Message> {
        self.signals = None;
        match self.messages.take() {
            Some(messages) => messages.drain().collect(),
            None => Vec::new(),
        }
    }

    /// Consume messages into `sink` until a Stop signal arrives or every intake handle is gone.
    ///
    /// Accepted messages are framed and written in queue order. On `Roll` the sink is rolled.
    /// On `Stop`, the messages already queued are written or discarded according to
    /// [`Sink::stop_policy`] and the intake is closed, so anything sent after that is handed
    /// back to its sender. The sink is closed before returning. A sink error ends the worker,
    /// and the messages still queued are reported as abandoned.
    pub async fn run<S: Sink>(mut self, mut sink: S) -> Result<Finished<S>, S::Error> {
        let mut stats = WorkerStats::default();
        if let Err(err) = self.consume(&mut sink, &mut stats).await {
            let pending = self.close();
            self.abandon(pending.len());
            return Err(err);
        }
        self.check(sink.close())?;
        self.diagnostics.worker_finished(&stats);
        Ok(Finished { sink, stats })
    }

    async fn consume<S: Sink>(
        &mut self,
        sink: &mut S,
        stats: &mut WorkerStats,
    ) -> Result<(), S::Error> {
        loop {
            match self.next().await {
                Next::Message(message) => {
                    self.deliver(sink, message, stats)?;
                }
                Next::Control(signal) => {
                    self.diagnostics.control_received(signal);
                    match signal {
                        ProducerControl::Roll => {
                            self.check(sink.roll())?;
                            stats.rolled += 1;
                        }
                        ProducerControl::Stop => return self.stop(sink, stats),
                    }
                }
                Next::Closed => return Ok(()),
            }
        }
    }

    fn stop<S: Sink>(&mut self, sink: &mut S, stats: &mut WorkerStats) -> Result<(), S::Error> {
        let pending = self.close();
        match sink.stop_policy() {
            StopPolicy::Drain => {
                let mut pending = pending.into_iter();
                while let Some(message) = pending.next() {
                    match self.deliver(sink, message, stats) {
                        Ok(true) => stats.drained += 1,
                        Ok(false) => (),
                        Err(err) => {
                            self.abandon(pending.len());
                            return Err(err);
                        }
                    }
                }
            }
            StopPolicy::Abandon => {
                stats.abandoned += self.abandon(pending.len());
            }
        }
        Ok(())
    }

    fn abandon(&self, count: usize) -> u64 {
        if count > 0 {
            self.diagnostics.messages_abandoned(count);
        }
        count as u64
    }

    /// Returns whether the message passed the filter.
    fn deliver<S: Sink>(
        &self,
        sink: &mut S,
        message: Message,
        stats: &mut WorkerStats,
    ) -> Result<bool, S::Error> {
        if !self.accepts(&message) {
            self.diagnostics.message_rejected(&message);
            stats.rejected += 1;
            return Ok(false);
        }
        let bytes = self.format.format_message(&message);
        self.check(sink.write(&bytes))?;
        stats.delivered += 1;
        Ok(true)
    }

    fn check<E: std::error::Error>(&self, res: Result<(), E>) -> Result<(), E> {
        if let Err(err) = &res {
            self.diagnostics.sink_error(err);
        }
        res
    }
}

impl From<Result<Message, flume::RecvError>> for Next {
    fn from(res: Result<Message, flume::RecvError>) -> Self {
        match res {
            Ok(message) => Next::Message(message),
            Err(flume::RecvError::Disconnected) => Next::Closed,
        }
    }
}
