//! Inspection helpers behind the `arcwire-tools` binary.
//!
//! Splits captures into `GameMessage` envelopes, decodes a single archive
//! payload into JSON or debug text, and parses numbers for the property
//! hash commands. Decoding always uses the identity data reference table,
//! so references print as their raw wire values.

use std::fmt::Debug;

use clap::ValueEnum;
use codec::{
    decode_archive, peek_replication_policy, ArchiveObject, CodecLimits, CodecResult,
    GameplayOptions, Player, PowerPropertyUpdate, RegionArchive, StashTabOption,
    UpdateAvatarStateArchive,
};
use schema::{DataRefTable, ReplicationPolicy};
use serde::Serialize;
use wire::{decode_messages, Limits};

/// Archive types the `decode` command understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchiveKind {
    Player,
    Region,
    AvatarState,
    GameplayOptions,
    StashTab,
    PropertyUpdate,
}

impl ArchiveKind {
    /// Returns `true` if the archive starts with a replication policy.
    #[must_use]
    pub const fn has_policy(self) -> bool {
        matches!(self, Self::Player | Self::Region | Self::AvatarState)
    }
}

/// One envelope found in a capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameEntry {
    pub offset: usize,
    pub id: u8,
    pub payload_len: usize,
}

/// Envelopes in a capture and where splitting stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub total_bytes: usize,
    pub frames: Vec<FrameEntry>,
    pub consumed: usize,
    pub error: Option<String>,
}

/// Splits `bytes` into envelopes.
#[must_use]
pub fn inspect_frames(bytes: &[u8], limits: &Limits) -> FrameReport {
    let batch = decode_messages(bytes, limits);
    let mut offset = 0;
    let frames = batch
        .messages
        .iter()
        .map(|message| {
            let entry = FrameEntry {
                offset,
                id: message.id,
                payload_len: message.payload.len(),
            };
            offset += message.encoded_len();
            entry
        })
        .collect();
    FrameReport {
        total_bytes: bytes.len(),
        frames,
        consumed: batch.consumed,
        error: batch.error.map(|err| err.to_string()),
    }
}

/// A decoded archive ready for printing.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedArchive {
    pub kind: String,
    pub size: usize,
    pub policy: Option<ReplicationPolicy>,
    pub value: serde_json::Value,
    #[serde(skip)]
    pub debug: String,
}

/// Decodes `bytes` as an archive of type `kind`.
pub fn decode_kind(
    kind: ArchiveKind,
    bytes: &[u8],
    refs: &dyn DataRefTable,
    limits: &CodecLimits,
) -> CodecResult<DecodedArchive> {
    match kind {
        ArchiveKind::Player => decode_as::<Player>(kind, bytes, refs, limits),
        ArchiveKind::Region => decode_as::<RegionArchive>(kind, bytes, refs, limits),
        ArchiveKind::AvatarState => decode_as::<UpdateAvatarStateArchive>(kind, bytes, refs, limits),
        ArchiveKind::GameplayOptions => decode_as::<GameplayOptions>(kind, bytes, refs, limits),
        ArchiveKind::StashTab => decode_as::<StashTabOption>(kind, bytes, refs, limits),
        ArchiveKind::PropertyUpdate => decode_as::<PowerPropertyUpdate>(kind, bytes, refs, limits),
    }
}

fn decode_as<T>(
    kind: ArchiveKind,
    bytes: &[u8],
    refs: &dyn DataRefTable,
    limits: &CodecLimits,
) -> CodecResult<DecodedArchive>
where
    T: ArchiveObject + Default + Debug + Serialize,
{
    let value: T = decode_archive(bytes, refs, limits)?;
    let policy = if kind.has_policy() {
        Some(peek_replication_policy(bytes)?)
    } else {
        None
    };
    Ok(DecodedArchive {
        kind: format!("{kind:?}"),
        size: bytes.len(),
        policy,
        // Plain data types; serialization to a Value cannot fail.
        value: serde_json::to_value(&value).unwrap_or(serde_json::Value::Null),
        debug: format!("{value:#?}"),
    })
}

/// Parses a decimal or `0x`-prefixed hexadecimal number.
pub fn parse_u64(text: &str) -> Result<u64, std::num::ParseIntError> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    }
}
