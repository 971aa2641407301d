//! Error types for stream operations.

use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while reading or writing wire primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    TruncatedInput {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A varint ran longer than its target width.
    #[error("varint does not fit in {max_bits} bits")]
    InvalidVarint {
        /// Width of the integer being decoded.
        max_bits: u32,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("string of {len} bytes is not valid UTF-8")]
    InvalidUtf8 {
        /// Byte length of the rejected string.
        len: usize,
    },

    /// A decoded length does not fit in memory on this platform.
    #[error("length {length} overflows the address space")]
    LengthOverflow {
        /// The decoded length.
        length: u64,
    },

    /// A packed boolean byte carried an impossible count.
    #[error("invalid boolean block byte 0x{byte:02X}")]
    InvalidBoolBlock {
        /// The offending byte.
        byte: u8,
    },

    /// A boolean was read after a group that packed fewer than five values.
    #[error("boolean read after a group of {count}")]
    BoolsAfterShortGroup {
        /// Value count of the short group.
        count: u8,
    },

    /// The write pass asked for more boolean slots than were cooked.
    #[error("boolean slot {index} requested but only {cooked} booleans were cooked")]
    BoolsExhausted {
        /// Zero-based index of the requested slot.
        index: usize,
        /// Number of booleans observed during the collect pass.
        cooked: usize,
    },
}
