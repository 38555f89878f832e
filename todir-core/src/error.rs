//! Error types for the todir ecosystem.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodirError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No todo matching '{0}'")]
    TodoNotFound(String),

    #[error("'{0}' matches more than one todo: {1}")]
    AmbiguousTodo(String, String),

    #[error("Could not parse ICS: {0}")]
    IcsParse(String),

    #[error("Could not generate ICS: {0}")]
    IcsGenerate(String),

    #[error("Invalid repeat rule: {0}")]
    InvalidRepeat(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TodirResult<T> = Result<T, TodirError>;
