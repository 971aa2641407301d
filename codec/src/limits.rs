//! Limits for archive decoding.

/// Codec-specific limits enforced while decoding archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum size of one archive payload in bytes.
    pub max_archive_bytes: usize,
    /// Maximum element count accepted for any list.
    pub max_list_len: usize,
    /// Maximum byte length accepted for any string.
    pub max_string_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_archive_bytes: 1024 * 1024,
            max_list_len: 4096,
            max_string_bytes: 1024,
        }
    }
}

impl CodecLimits {
    /// Tight limits for tests and fuzzing.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_archive_bytes: 4096,
            max_list_len: 32,
            max_string_bytes: 64,
        }
    }

    /// Lifts every bound. Only for trusted local archives.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_archive_bytes: usize::MAX,
            max_list_len: usize::MAX,
            max_string_bytes: usize::MAX,
        }
    }
}
