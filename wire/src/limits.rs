//! Configurable limits for bounded unframing.

/// Framing limits.
///
/// Enforced while decoding envelopes so a hostile length prefix cannot force
/// a large allocation. Payload contents are bounded by the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum payload length of a single message in bytes.
    pub max_payload_bytes: usize,

    /// Maximum number of messages decoded from one buffer.
    pub max_messages: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Region and player archives stay well under this
            max_payload_bytes: 1024 * 1024,
            max_messages: 1024,
        }
    }
}

impl Limits {
    /// Tight limits for tests and fuzzing.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_payload_bytes: 4096,
            max_messages: 16,
        }
    }

    /// Accepts any envelope size and count. Only for trusted local captures.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_payload_bytes: usize::MAX,
            max_messages: usize::MAX,
        }
    }
}
