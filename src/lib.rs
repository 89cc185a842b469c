//! <div align="center">
//!
//!   <h1>SeaShipper</h1>
//!
//!   <p>
//!     <strong>🚢 The log shipping toolkit for Rust</strong>
//!   </p>
//!
//! </div>
//!
//! SeaShipper is the core of a message routing / log shipping pipeline: data enters through
//! input stages, is tokenized into structured records, routed across named streams, and emitted
//! by output stages with configurable framing and filtering.
//!
//! ## Architecture
//!
//! `sea-shipper` is the facade crate re-exporting implementation from a number of sub-crates:
//!
//! + `sea-shipper-types`: stream keys, messages and control signals
//! + `sea-shipper-tokenizer`: a generic table driven tokenizer, for input stages
//! + `sea-shipper-producer`: the producer base every output stage is built on
//!
//! ```text
//! bytes -> Tokenizer -> record -> (router) -> IntakeHandle -> Filter -> MessageFormat -> Sink
//!                                               ControlHandle ---^
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use sea_shipper_types::*;

#[cfg(feature = "tokenizer")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokenizer")))]
pub use sea_shipper_tokenizer::*;

#[cfg(feature = "producer")]
#[cfg_attr(docsrs, doc(cfg(feature = "producer")))]
pub use sea_shipper_producer::*;
