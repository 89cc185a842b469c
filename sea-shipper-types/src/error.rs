use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that may happen when handling StreamKey
pub enum StreamKeyErr {
    #[error("Invalid stream key: valid pattern is [a-zA-Z0-9._-]{{1, 249}}")]
    InvalidStreamKey,
}
