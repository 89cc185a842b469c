//! # 🚢 SeaShipper Tokenizer
//!
//! A generic finite-state tokenizer. It turns a byte sequence into an ordered list of
//! typed tokens, driven entirely by a caller supplied [`TransitionTable`]. The engine knows
//! nothing about any wire format.
//!
//! Each state lists its transitions in priority order. At every step the tokenizer looks for the
//! trigger that occurs earliest in the remaining input (ties go to the transition listed first),
//! then either emits the bytes scanned since the last boundary as a [`Token`] tagged with the
//! *source* state, or discards them, and moves to the target state.
//!
//! ```
//! use sea_shipper_tokenizer::{Tokenizer, Transition, TransitionTable};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Field { Key, Value }
//!
//! let table = TransitionTable::new()
//!     .with(Field::Key, [Transition::emit("=", Field::Value)])?
//!     .with(Field::Value, [Transition::emit(";", Field::Key)])?;
//! let tokenizer = Tokenizer::new(table);
//!
//! let tokens = tokenizer.tokenize(b"level=info;", Field::Key);
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].data(), b"level");
//! assert_eq!(tokens[1].state(), Field::Value);
//! # Ok::<(), sea_shipper_tokenizer::TableErr>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod error;
mod token;
mod tokenizer;
mod transition;

pub use error::*;
pub use token::*;
pub use tokenizer::*;
pub use transition::*;
