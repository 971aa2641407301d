//! Compact wire hash for power property identifiers.
//!
//! Power property ids only vary in bits 12..26. The wire carries that
//! 14-bit window with its bit order reversed; the low twelve bits are always
//! [`POWER_PROPERTY_TAG`] and are rebuilt on the receiving side. These
//! constants come from captured client traffic and must not be re-derived.

use crate::error::{SchemaError, SchemaResult};

/// Constant low bits shared by every power property id.
pub const POWER_PROPERTY_TAG: u64 = 0x3ba;

/// Width of the hashed window.
pub const PROPERTY_HASH_BITS: u32 = 14;

/// Position of the hashed window inside a property id.
pub const PROPERTY_HASH_SHIFT: u32 = 12;

const WINDOW_MASK: u64 = (1 << PROPERTY_HASH_BITS) - 1;
const TAG_MASK: u64 = (1 << PROPERTY_HASH_SHIFT) - 1;

/// Reverses the low 14 bits of `value`. Higher bits are discarded.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn reverse_window(value: u64) -> u64 {
    let window = (value & WINDOW_MASK) as u16;
    (window.reverse_bits() >> (16 - PROPERTY_HASH_BITS)) as u64
}

/// Hashes a property id: bits 12..26, bit-reversed, in the low 14 bits.
#[must_use]
pub const fn property_hash(id: u64) -> u64 {
    reverse_window(id >> PROPERTY_HASH_SHIFT)
}

/// Rebuilds a power property id from its wire hash.
#[must_use]
pub const fn property_unhash(hash: u64) -> u64 {
    (reverse_window(hash) << PROPERTY_HASH_SHIFT) + POWER_PROPERTY_TAG
}

/// Returns `true` if `id` survives a hash/unhash round trip.
#[must_use]
pub const fn is_power_property(id: u64) -> bool {
    id & TAG_MASK == POWER_PROPERTY_TAG && id >> (PROPERTY_HASH_SHIFT + PROPERTY_HASH_BITS) == 0
}

/// Hashes `id`, rejecting ids outside the power-property scheme.
pub fn checked_property_hash(id: u64) -> SchemaResult<u64> {
    if !is_power_property(id) {
        return Err(SchemaError::NotPowerProperty { id });
    }
    Ok(property_hash(id))
}

/// Unhashes a wire hash, rejecting values wider than the hash window.
pub fn checked_property_unhash(hash: u64) -> SchemaResult<u64> {
    if hash >> PROPERTY_HASH_BITS != 0 {
        return Err(SchemaError::InvalidPropertyHash { hash });
    }
    Ok(property_unhash(hash))
}
