//! Field codec descriptors.

/// Fractional bits used for positions.
pub const POSITION_PRECISION: u8 = 3;

/// Fractional bits used for orientations and angles.
pub const ORIENTATION_PRECISION: u8 = 6;

/// Fractional bits used for locomotion move speed.
pub const MOVE_SPEED_PRECISION: u8 = 0;

/// Fractional bits used for follow ranges.
pub const RANGE_PRECISION: u8 = 0;

/// The wire encoding of a single archive slot (representation only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldCodec {
    /// Cooked boolean slot.
    Bool,

    /// Unsigned varint, 32-bit range.
    VarU32,

    /// Unsigned varint, 64-bit range.
    VarU64,

    /// Two's complement varint, 32-bit range.
    VarI32,

    /// Two's complement varint, 64-bit range.
    VarI64,

    /// Little-endian fixed 32-bit integer.
    Fixed32,

    /// Zigzag varint of a fixed-point float.
    ZigZagFloat { precision: u8 },

    /// Varint length followed by UTF-8 bytes.
    String,

    /// Data reference code.
    DataRef,

    /// Element count of the list that follows.
    Count,

    /// Replication policy bitmask.
    Policy,
}

impl FieldCodec {
    /// Creates a zigzag float codec.
    #[must_use]
    pub const fn zigzag(precision: u8) -> Self {
        Self::ZigZagFloat { precision }
    }

    /// Returns a stable tag used when fingerprinting layouts.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::VarU32 => 1,
            Self::VarU64 => 2,
            Self::VarI32 => 3,
            Self::VarI64 => 4,
            Self::Fixed32 => 5,
            Self::ZigZagFloat { .. } => 6,
            Self::String => 7,
            Self::DataRef => 8,
            Self::Count => 9,
            Self::Policy => 10,
        }
    }

    /// Returns `true` for slots filled from the boolean cooker.
    #[must_use]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_constants() {
        assert_eq!(POSITION_PRECISION, 3);
        assert_eq!(ORIENTATION_PRECISION, 6);
        assert_eq!(MOVE_SPEED_PRECISION, 0);
        assert_eq!(RANGE_PRECISION, 0);
    }

    #[test]
    fn zigzag_constructor() {
        assert_eq!(
            FieldCodec::zigzag(POSITION_PRECISION),
            FieldCodec::ZigZagFloat { precision: 3 }
        );
    }

    #[test]
    fn tags_are_distinct() {
        let codecs = [
            FieldCodec::Bool,
            FieldCodec::VarU32,
            FieldCodec::VarU64,
            FieldCodec::VarI32,
            FieldCodec::VarI64,
            FieldCodec::Fixed32,
            FieldCodec::zigzag(0),
            FieldCodec::String,
            FieldCodec::DataRef,
            FieldCodec::Count,
            FieldCodec::Policy,
        ];
        let mut tags: Vec<u8> = codecs.iter().map(|c| c.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), codecs.len());
        assert!(FieldCodec::Bool.is_bool());
        assert!(!FieldCodec::Count.is_bool());
    }
}
