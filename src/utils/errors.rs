//! Custom error types for the manifest generator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Invalid storage URI: {0}")]
    InvalidUri(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ManifestError>;
