//! Error types for rh-codec

use thiserror::Error;

/// Main error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of stream at offset {offset:#x}: needed {needed} bytes, {available} available")]
    UnexpectedEndOfStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid length prefix at offset {offset:#x}: {count} UTF-16 characters, only {available} bytes available")]
    InvalidLengthPrefix {
        offset: usize,
        count: usize,
        available: usize,
    },

    #[error("String too long for a 16-bit length prefix: {units} UTF-16 code units")]
    StringTooLong { units: usize },
}

impl Error {
    /// Byte offset the failing read started at, if the error carries one
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::UnexpectedEndOfStream { offset, .. } | Error::InvalidLengthPrefix { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;
