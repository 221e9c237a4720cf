//! Error types for the RustMETS core.

use std::io;
use std::path::PathBuf;

use rustmets_xml::XmlError;

/// Core error type for RustMETS operations.
#[derive(Debug, thiserror::Error)]
pub enum RustMetsError {
    /// Reading or writing METS XML failed.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Every identifier of the configured length has been minted.
    #[error("identifier space of length {length} is exhausted")]
    IdSpaceExhausted {
        /// Identifier length.
        length: usize,
    },

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for RustMETS operations.
pub type RustMetsResult<T> = Result<T, RustMetsError>;
