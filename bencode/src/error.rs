use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

// Decode errors carry the byte offset at which the problem was detected.
#[derive(Debug, thiserror::Error)]
pub enum Error {

    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("byte string at offset {offset} needs {expected} bytes, only {available} left")]
    TruncatedByteString {
        offset:    usize,
        expected:  usize,
        available: usize,
    },

    // Type valid but unexpected token.
    #[error("invalid token at offset {offset}: expected {expected}, found {found:?}")]
    InvalidToken {
        offset:   usize,
        expected: &'static str,
        found:    char,
    },

    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger {
        offset: usize,
        reason: &'static str,
    },

    #[error("invalid byte string length at offset {offset}: {reason}")]
    InvalidLength {
        offset: usize,
        reason: &'static str,
    },

    #[error("duplicate dictionary key {key:?} at offset {offset}")]
    DuplicateKey {
        offset: usize,
        key:    String,
    },

    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },

    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep {
        offset: usize,
        limit:  usize,
    },

    // Attempted to serialize a type bencode cannot represent.
    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Map serialization error: {0}")]
    MapSerializationOrder(String),

    #[error("{0}")]
    Custom(String),

}

impl Error {
    // Byte offset into the input, for decode errors.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Error::UnexpectedEof { offset }
            | Error::TruncatedByteString { offset, .. }
            | Error::InvalidToken { offset, .. }
            | Error::InvalidInteger { offset, .. }
            | Error::InvalidLength { offset, .. }
            | Error::DuplicateKey { offset, .. }
            | Error::TrailingData { offset }
            | Error::NestingTooDeep { offset, .. } => Some(offset),
            Error::InvalidType(_)
            | Error::MapSerializationOrder(_)
            | Error::Custom(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg:T) -> Self where T:Display {
        Error::Custom(msg.to_string())
    }
}
