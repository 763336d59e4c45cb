use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrackError {
    // Arguments
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("word list is empty: {}", .0.display())]
    EmptyWordList(PathBuf),

    // Runtime
    #[error("thread pool failure: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrackError {
    /// Whether the error comes from what the caller passed in, as opposed
    /// to the environment the search ran in.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::EmptyWordList(_))
    }
}
