//! Archives carried inside `GameMessage` envelopes.

use schema::DataRefTable;
use wire::{GameMessage, Limits as WireLimits};

use crate::archive::{decode_archive, encode_archive, ArchiveObject};
use crate::error::CodecResult;
use crate::limits::CodecLimits;

/// Encodes `value` and wraps it in a message with type `id`.
pub fn archive_message<T: ArchiveObject>(
    id: u8,
    value: &mut T,
    refs: &dyn DataRefTable,
) -> CodecResult<GameMessage> {
    let payload = encode_archive(value, refs)?;
    Ok(GameMessage::new(id, payload))
}

/// Decodes the archive carried by `message`.
pub fn decode_message_archive<T: ArchiveObject + Default>(
    message: &GameMessage,
    refs: &dyn DataRefTable,
    limits: &CodecLimits,
) -> CodecResult<T> {
    decode_archive(&message.payload, refs, limits)
}

/// Unframes a buffer holding exactly one envelope and decodes its archive.
pub fn decode_framed_archive<T: ArchiveObject + Default>(
    buf: &[u8],
    wire_limits: &WireLimits,
    refs: &dyn DataRefTable,
    limits: &CodecLimits,
) -> CodecResult<(u8, T)> {
    let message = GameMessage::from_bytes(buf, wire_limits)?;
    let value = decode_message_archive(&message, refs, limits)?;
    Ok((message.id, value))
}
