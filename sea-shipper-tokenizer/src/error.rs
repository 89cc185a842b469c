use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that may happen when building a [`crate::TransitionTable`]
pub enum TableErr {
    #[error("Transition trigger must not be empty")]
    EmptyTrigger,
}
