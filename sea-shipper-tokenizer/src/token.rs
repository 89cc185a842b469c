use std::{ops::Deref, str::Utf8Error};

use crate::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One unit of tokenized data, borrowed from the input.
pub struct Token<'a, S: State> {
    state: S,
    data: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The outcome of one tokenization pass: the tokens in scan order plus the bytes after the
/// last consumed trigger.
pub struct Tokens<'a, S: State> {
    tokens: Vec<Token<'a, S>>,
    residue: &'a [u8],
}

impl<'a, S: State> Token<'a, S> {
    pub fn new(state: S, data: &'a [u8]) -> Self {
        Self { state, data }
    }

    /// The state that was active when this token was emitted, i.e. the source state of the
    /// transition that produced it.
    pub fn state(&self) -> S {
        self.state
    }

    /// The bytes between the previous token boundary and the trigger, trigger excluded.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn as_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.data)
    }

    /// Parse the data as an unsigned decimal, e.g. the element count of an array field.
    pub fn as_u64(&self) -> Option<u64> {
        parse_decimal(self.data)
    }
}

impl<'a, S: State> Tokens<'a, S> {
    pub(crate) fn new(tokens: Vec<Token<'a, S>>, residue: &'a [u8]) -> Self {
        Self { tokens, residue }
    }

    /// Bytes that were scanned but not consumed by any trigger.
    pub fn residue(&self) -> &'a [u8] {
        self.residue
    }

    /// True if every input byte was consumed.
    pub fn is_complete(&self) -> bool {
        self.residue.is_empty()
    }

    pub fn into_vec(self) -> Vec<Token<'a, S>> {
        self.tokens
    }
}

impl<'a, S: State> Deref for Tokens<'a, S> {
    type Target = [Token<'a, S>];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl<'a, S: State> IntoIterator for Tokens<'a, S> {
    type Item = Token<'a, S>;
    type IntoIter = std::vec::IntoIter<Token<'a, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Parse ASCII decimal digits into an integer. Returns `None` on empty input, on any
/// non-digit byte, or on overflow.
pub fn parse_decimal(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0u64, |acc, &b| match b {
        b'0'..=b'9' => acc.checked_mul(10)?.checked_add(u64::from(b - b'0')),
        _ => None,
    })
}
