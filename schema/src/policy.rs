//! Bitmask enums that travel inside archives.

use bitflags::bitflags;

bitflags! {
    /// Network audience an archive is destined for.
    ///
    /// Always the first field of a top-level archive. Unknown bits are kept
    /// so a re-encoded archive reproduces the bytes it was decoded from.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ReplicationPolicy: u32 {
        const PROXIMITY = 1 << 0;
        const PARTY = 1 << 1;
        const OWNER = 1 << 2;
        const TRADER = 1 << 3;
        const DISCOVERY = 1 << 4;
        const CLIENT_INDEPENDENT = 1 << 5;
    }
}

impl ReplicationPolicy {
    /// Policy used for archives sent only to their owner.
    pub const OWNER_ONLY: Self = Self::OWNER;

    /// Builds a policy from its wire value, keeping unknown bits.
    #[must_use]
    pub const fn from_wire(value: u32) -> Self {
        Self::from_bits_retain(value)
    }

    /// Returns `true` if a receiver in `audience` should accept this archive.
    #[must_use]
    pub const fn reaches(self, audience: Self) -> bool {
        self.intersects(audience)
    }
}

bitflags! {
    /// Optional sections present in an avatar locomotion update.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LocomotionMessageFlags: u32 {
        const HAS_FULL_ORIENTATION = 1 << 0;
        const RELATIVE_TO_PREVIOUS_STATE = 1 << 1;
        const HAS_LOCOMOTION_FLAGS = 1 << 2;
        const HAS_METHOD = 1 << 3;
        const UPDATE_PATH_NODES = 1 << 4;
        const LOCOMOTION_FINISHED = 1 << 5;
        const HAS_MOVE_SPEED = 1 << 6;
        const HAS_HEIGHT = 1 << 7;
        const HAS_FOLLOW_ENTITY_ID = 1 << 8;
        const HAS_FOLLOW_ENTITY_RANGE = 1 << 9;
        const HAS_ENTITY_PROTOTYPE_ID = 1 << 10;
    }
}
