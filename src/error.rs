use std::io;

use thiserror::Error;

use crate::bytestring::ByteString;

/// Failure of a single decode call. Every variant is terminal: decoding
/// cannot resume after an error.
#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("unexpected end of input at byte {position}")]
    EndOfInput { position: u64 },

    #[error("{kind} at byte {position}")]
    Syntax { kind: SyntaxError, position: u64 },

    #[error("nesting deeper than {limit} levels at byte {position}")]
    NestingTooDeep { limit: usize, position: u64 },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    EndOfInput,
    Syntax,
    NestingTooDeep,
    Io,
}

impl DecodingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodingError::EndOfInput { .. } => ErrorKind::EndOfInput,
            DecodingError::Syntax { .. } => ErrorKind::Syntax,
            DecodingError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            DecodingError::Io(_) => ErrorKind::Io,
        }
    }

    /// The grammar violation, if this is a syntax error.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            DecodingError::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Byte offset the error was detected at. I/O errors carry none.
    pub fn position(&self) -> Option<u64> {
        match self {
            DecodingError::EndOfInput { position }
            | DecodingError::Syntax { position, .. }
            | DecodingError::NestingTooDeep { position, .. } => Some(*position),
            DecodingError::Io(_) => None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SyntaxError {
    #[error("unrecognized value start {:?}", symbol(.0))]
    UnrecognizedValueStart(u8),

    #[error("expected identifier {:?}", symbol(.0))]
    MissingIdentifier(u8),

    #[error("expected length separator ':' but found {:?}", symbol(.0))]
    ExpectedLengthSeparator(u8),

    #[error("missing byte string length")]
    MissingLength,

    #[error("byte string length overflow")]
    LengthOverflow,

    #[error("invalid integer literal {0:?}")]
    InvalidInteger(String),

    #[error("dictionary key must be a byte string")]
    KeyNotByteString,

    #[error("dictionary key '{0}' without value")]
    KeyWithoutValue(ByteString),

    #[error("non-canonical integer literal {0:?}")]
    NonCanonicalInteger(String),

    #[error("non-canonical byte string length {0:?}")]
    NonCanonicalLength(String),

    #[error("dictionary key '{0}' out of order")]
    UnsortedKeys(ByteString),

    #[error("duplicate dictionary key '{0}'")]
    DuplicateKey(ByteString),
}

fn symbol(byte: &u8) -> char {
    char::from(*byte)
}
