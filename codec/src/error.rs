//! Error types for archive encoding and decoding.

use std::fmt;

use bitstream::StreamError;
use schema::SchemaError;
use thiserror::Error;
use wire::FramingError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding an archive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Primitive read or boolean block failure.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// Data reference or property id failure.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The envelope around an archive payload was malformed.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// A decoded size is over its configured limit.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A list count claims more elements than bytes remain.
    #[error("count {count} exceeds the {remaining} bytes left in the archive")]
    CountExceedsInput { count: u64, remaining: usize },

    /// Bytes remained after the archive's last field.
    #[error("length mismatch: {remaining} bytes left after archive")]
    LengthMismatch { remaining: usize },

    /// The last packed boolean byte claimed more values than the archive has.
    #[error("{remaining} packed booleans left after archive")]
    UnreadBools { remaining: usize },

    /// The write pass visited fewer boolean slots than the collect pass.
    #[error("boolean count mismatch: {observed} collected, {written} written")]
    BoolCountMismatch { observed: usize, written: usize },

    /// The write pass reached a boolean slot holding a different value than collected.
    #[error("boolean slot {slot} changed between collect and write")]
    BoolDesync { slot: usize },
}

/// Decode limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    ArchiveBytes,
    ListElements,
    StringBytes,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ArchiveBytes => "archive bytes",
            Self::ListElements => "list elements",
            Self::StringBytes => "string bytes",
        };
        write!(f, "{name}")
    }
}

impl CodecError {
    /// Returns `true` if decoding failed because the input ended early.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Stream(StreamError::TruncatedInput { .. }))
    }
}
