//! Error types shared by the encoder and decoder.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a feed or finish call can fail.
///
/// Every variant is fatal for the stream it occurred in. The context keeps the
/// output produced so far, but further feeding returns the same error until
/// [`Context::reset`](crate::Context::reset) is called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The output buffer could not grow by `requested` bytes.
    #[error("memory allocation failure (requested {requested} more bytes)")]
    AllocationFailure { requested: usize },
    /// A five digit group encodes a value above `u32::MAX`.
    #[error("decoding overflow in group ending at byte {position}")]
    Overflow { position: usize },
    /// A byte outside the alphabet appeared where a digit was expected.
    #[error("invalid character {byte:#04x} at byte {position}")]
    InvalidCharacter { byte: u8, position: usize },
    /// The `<~ ... ~>` wrapper is malformed or incomplete.
    #[error("missing ascii85 footer or stray '~' at byte {position}")]
    BadEnvelope { position: usize },
    /// The caller violated the context protocol.
    #[error("api misuse: {0}")]
    ApiMisuse(Misuse),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            Error::Overflow { .. } => ErrorKind::Overflow,
            Error::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Error::BadEnvelope { .. } => ErrorKind::BadEnvelope,
            Error::ApiMisuse(_) => ErrorKind::ApiMisuse,
        }
    }
}

/// Protocol violations reported through [`Error::ApiMisuse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Misuse {
    /// `*_feed` was called after `*_finish`.
    FeedAfterFinish,
    /// `*_finish` was called a second time.
    FinishTwice,
    /// Encode and decode calls were mixed on one context.
    ModeMismatch,
}

impl fmt::Display for Misuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Misuse::FeedAfterFinish => "feed called after finish",
            Misuse::FinishTwice => "finish called twice",
            Misuse::ModeMismatch => "encode and decode mixed on one context",
        })
    }
}

/// Fieldless counterpart of [`Error`], for reporting and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AllocationFailure,
    Overflow,
    InvalidCharacter,
    BadEnvelope,
    ApiMisuse,
}

impl ErrorKind {
    /// Short identifier, e.g. `"InvalidCharacter"`.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::AllocationFailure => "AllocationFailure",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::InvalidCharacter => "InvalidCharacter",
            ErrorKind::BadEnvelope => "BadEnvelope",
            ErrorKind::ApiMisuse => "ApiMisuse",
        }
    }

    /// Human readable description.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::AllocationFailure => "Memory allocation failure",
            ErrorKind::Overflow => "Decoding a byte sequence resulted in an integer overflow",
            ErrorKind::InvalidCharacter => "An invalid character was encountered while decoding",
            ErrorKind::BadEnvelope => "The ascii85 footer is missing, or a stray '~' was encountered",
            ErrorKind::ApiMisuse => "The context was used in a way its contract does not allow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
