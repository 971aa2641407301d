//! Error types for message framing.

use bitstream::StreamError;
use thiserror::Error;

/// Result type for framing operations.
pub type WireResult<T> = Result<T, FramingError>;

/// Errors that can occur while framing or unframing a `GameMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FramingError {
    /// The buffer ended inside an envelope.
    #[error("truncated message: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The id or length varint was malformed.
    #[error("invalid varint in message envelope")]
    InvalidVarint,

    /// Message ids are a single byte on the wire side.
    #[error("message id {id} does not fit in a byte")]
    InvalidMessageId { id: u64 },

    /// The declared payload length is over the configured limit.
    #[error("payload of {actual} bytes exceeds limit of {limit}")]
    PayloadTooLarge { limit: usize, actual: usize },

    /// Bytes followed a message that should have filled the buffer.
    #[error("{count} trailing bytes after message")]
    TrailingBytes { count: usize },

    /// A batch held more envelopes than allowed.
    #[error("batch exceeds {limit} messages")]
    TooManyMessages { limit: usize },
}

impl From<StreamError> for FramingError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::TruncatedInput {
                requested,
                available,
            } => Self::Truncated {
                needed: requested,
                available,
            },
            StreamError::LengthOverflow { length } => Self::PayloadTooLarge {
                limit: usize::MAX,
                actual: usize::try_from(length).unwrap_or(usize::MAX),
            },
            _ => Self::InvalidVarint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_display() {
        let err = FramingError::Truncated {
            needed: 10,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("truncated"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn payload_too_large_display() {
        let err = FramingError::PayloadTooLarge {
            limit: 4,
            actual: 10,
        };
        assert!(err.to_string().contains("exceeds limit of 4"));
    }

    #[test]
    fn stream_errors_map_to_framing() {
        let err: FramingError = StreamError::TruncatedInput {
            requested: 3,
            available: 1,
        }
        .into();
        assert_eq!(
            err,
            FramingError::Truncated {
                needed: 3,
                available: 1
            }
        );
        let err: FramingError = StreamError::InvalidVarint { max_bits: 32 }.into();
        assert_eq!(err, FramingError::InvalidVarint);
    }
}
