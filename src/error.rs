use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("could not read staged changes: {0}")]
    DiffUnavailable(String),
    #[error("language model request failed: {0}")]
    Network(String),
    #[error("No response from model")]
    EmptyResponse,
    #[error("failed to copy to clipboard: {0}")]
    Clipboard(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
