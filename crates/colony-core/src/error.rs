//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No ants spawned on the map")]
    NoAnts,

    #[error("No fruits spawned on the map")]
    NoFruit,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Construction failures that a fresh random draw may avoid
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::NoAnts | Error::NoFruit)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
