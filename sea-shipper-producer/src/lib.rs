//! # 🚢 SeaShipper Producer
//!
//! The contract every output stage honours. A [`ProducerBase`] owns
//!
//! + a bounded intake queue; the router enqueues through an [`IntakeHandle`] and blocks when
//!   the queue is full
//! + a control channel of capacity one; the supervisor sends [`ProducerControl`] signals through
//!   a [`ControlHandle`]
//! + an optional acceptance [`Filter`]
//! + the [`MessageFormat`] chosen at configuration time
//!
//! Concrete sinks compose a `ProducerBase` (see [`Producer`]) and hand a [`Sink`] to
//! [`ProducerBase::run`], which multiplexes control signals and messages, filters, frames and
//! writes until told to stop.
//!
//! [`ProducerControl`]: sea_shipper_types::ProducerControl

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod base;
mod diagnostics;
mod error;
mod filter;
mod format;
mod handle;
mod options;
mod sink;
mod worker;

pub use base::*;
pub use diagnostics::*;
pub use error::*;
pub use filter::*;
pub use format::*;
pub use handle::*;
pub use options::*;
pub use sink::*;
pub use worker::*;
