//! Deterministic layout fingerprinting.

use blake3::Hasher;

use crate::FieldCodec;

/// Computes a deterministic fingerprint of an archive's slot sequence.
///
/// Any change in slot order, slot codec or float precision changes the hash.
#[must_use]
pub fn layout_hash(slots: &[FieldCodec]) -> u64 {
    let mut hasher = Hasher::new();
    write_u32(&mut hasher, u32::try_from(slots.len()).unwrap_or(u32::MAX));

    for codec in slots {
        write_u8(&mut hasher, codec.tag());
        if let FieldCodec::ZigZagFloat { precision } = codec {
            write_u8(&mut hasher, *precision);
        }
    }

    let hash = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
