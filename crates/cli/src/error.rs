//! CLI error types

use thiserror::Error;
use typegen_engine::{EngineError, GenerationFailure, ParseError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Message(String),
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Engine(err.into())
    }
}

impl From<GenerationFailure> for CliError {
    fn from(err: GenerationFailure) -> Self {
        CliError::Engine(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;
