use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::TableErr;

/// A position in the tokenizer's grammar. Its meaning is assigned entirely by the
/// [`TransitionTable`]; any small `Copy` identifier (typically a fieldless enum) qualifies.
pub trait State: Debug + Copy + Eq + Hash + Send + Sync {}

impl<T> State for T where T: Debug + Copy + Eq + Hash + Send + Sync {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// What happens to the pending bytes when a transition fires.
pub enum TransitionKind {
    /// Emit the bytes scanned since the last token boundary as a token.
    Emit,
    /// Discard the pending bytes and restart the token at the end of the trigger.
    /// Used by transitions that only switch grammar mode.
    RestartWithoutEmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S: State> {
    trigger: Vec<u8>,
    target: S,
    kind: TransitionKind,
}

#[derive(Debug, Clone)]
/// Maps each state to its transitions, in priority order. Immutable once handed to a
/// [`crate::Tokenizer`].
pub struct TransitionTable<S: State> {
    states: HashMap<S, Vec<Transition<S>>>,
}

impl<S: State> Transition<S> {
    pub fn new<T: Into<Vec<u8>>>(trigger: T, target: S, kind: TransitionKind) -> Self {
        Self {
            trigger: trigger.into(),
            target,
            kind,
        }
    }

    /// Shorthand of [`TransitionKind::Emit`].
    pub fn emit<T: Into<Vec<u8>>>(trigger: T, target: S) -> Self {
        Self::new(trigger, target, TransitionKind::Emit)
    }

    /// Shorthand of [`TransitionKind::RestartWithoutEmit`].
    pub fn restart<T: Into<Vec<u8>>>(trigger: T, target: S) -> Self {
        Self::new(trigger, target, TransitionKind::RestartWithoutEmit)
    }

    pub fn trigger(&self) -> &[u8] {
        &self.trigger
    }

    pub fn target(&self) -> S {
        self.target
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }
}

impl<S: State> Default for TransitionTable<S> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
        }
    }
}

impl<S: State> TransitionTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition to the list of `from`. Transitions added earlier take priority
    /// when two triggers match at the same offset.
    pub fn add(&mut self, from: S, transition: Transition<S>) -> Result<&mut Self, TableErr> {
        if transition.trigger.is_empty() {
            return Err(TableErr::EmptyTrigger);
        }
        log::trace!(
            "{from:?} --{:?}--> {:?} ({:?})",
            String::from_utf8_lossy(&transition.trigger),
            transition.target,
            transition.kind
        );
        self.states.entry(from).or_default().push(transition);
        Ok(self)
    }

    /// Builder style variant of [`TransitionTable::add`].
    pub fn with<I>(mut self, from: S, transitions: I) -> Result<Self, TableErr>
    where
        I: IntoIterator<Item = Transition<S>>,
    {
        for transition in transitions {
            self.add(from, transition)?;
        }
        Ok(self)
    }

    pub fn transitions(&self, state: &S) -> Option<&[Transition<S>]> {
        self.states.get(state).map(Vec::as_slice)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
