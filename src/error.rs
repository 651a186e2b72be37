// Error types for gignore.
// Covers remote API failures, filesystem errors, and invalid user input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GignoreError {
    #[error("Request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("HTTP-Error: {status}")]
    Http { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid language name: {0:?}")]
    InvalidLanguage(String),

    #[error("not a git repository (or any parent up to mount point /)")]
    NotARepository,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, GignoreError>;
