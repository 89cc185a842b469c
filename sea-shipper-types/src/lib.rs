//! # 🚢 SeaShipper Types
//!
//! This crate defines the types shared by every stage of a SeaShipper pipeline:
//! stream keys, messages and producer control signals. It does not provide any behaviour.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod control;
mod error;
mod message;
mod stream;

pub use control::*;
pub use error::*;
pub use message::*;
pub use stream::*;
