//! `GameMessage` envelope: `[varint id][varint length][payload]`.

use bitstream::{var_u64_len, ByteReader, ByteWriter};

use crate::error::{FramingError, WireResult};
use crate::limits::Limits;

/// An opaque protocol payload tagged with its message type id.
///
/// The envelope does not know the payload's schema; callers map `id` to a
/// decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub id: u8,
    pub payload: Vec<u8>,
}

impl GameMessage {
    /// Creates a message from an id and payload.
    #[must_use]
    pub fn new(id: u8, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    /// Returns the encoded size of the envelope and payload.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        var_u64_len(u64::from(self.id)) + var_u64_len(self.payload.len() as u64) + self.payload.len()
    }

    /// Appends the envelope to `writer`.
    pub fn encode(&self, writer: &mut ByteWriter) -> WireResult<()> {
        let len = u32::try_from(self.payload.len()).map_err(|_| FramingError::PayloadTooLarge {
            limit: u32::MAX as usize,
            actual: self.payload.len(),
        })?;
        writer.write_var_u32(u32::from(self.id));
        writer.write_var_u32(len);
        writer.write_bytes(&self.payload);
        Ok(())
    }

    /// Encodes the message into a fresh buffer.
    pub fn to_bytes(&self) -> WireResult<Vec<u8>> {
        let mut writer = ByteWriter::with_capacity(self.encoded_len());
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }

    /// Decodes one envelope from `reader`.
    ///
    /// On failure the reader is left where it was.
    pub fn decode(reader: &mut ByteReader<'_>, limits: &Limits) -> WireResult<Self> {
        let mut scratch = reader.clone();
        let message = Self::decode_inner(&mut scratch, limits)?;
        *reader = scratch;
        Ok(message)
    }

    /// Decodes a buffer holding exactly one envelope.
    pub fn from_bytes(buf: &[u8], limits: &Limits) -> WireResult<Self> {
        let mut reader = ByteReader::new(buf);
        let message = Self::decode(&mut reader, limits)?;
        if !reader.is_empty() {
            return Err(FramingError::TrailingBytes {
                count: reader.remaining(),
            });
        }
        Ok(message)
    }

    fn decode_inner(reader: &mut ByteReader<'_>, limits: &Limits) -> WireResult<Self> {
        let raw_id = reader.read_var_u32()?;
        let id = u8::try_from(raw_id).map_err(|_| FramingError::InvalidMessageId {
            id: u64::from(raw_id),
        })?;
        let declared = reader.read_var_u32()? as usize;
        if declared > limits.max_payload_bytes {
            return Err(FramingError::PayloadTooLarge {
                limit: limits.max_payload_bytes,
                actual: declared,
            });
        }
        let payload = reader.read_bytes(declared)?.to_vec();
        Ok(Self { id, payload })
    }
}

/// Result of splitting a buffer into envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBatch {
    /// Every envelope decoded before the first framing failure.
    pub messages: Vec<GameMessage>,
    /// Bytes consumed by `messages`.
    pub consumed: usize,
    /// The failure that stopped decoding, if any.
    pub error: Option<FramingError>,
}

impl MessageBatch {
    /// Returns `true` if the whole buffer was consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Decodes back-to-back envelopes until the buffer ends or framing fails.
///
/// A failed envelope is discarded; messages before it are returned intact.
pub fn decode_messages(buf: &[u8], limits: &Limits) -> MessageBatch {
    let mut reader = ByteReader::new(buf);
    let mut messages = Vec::new();
    let mut error = None;

    while !reader.is_empty() {
        if messages.len() >= limits.max_messages {
            error = Some(FramingError::TooManyMessages {
                limit: limits.max_messages,
            });
            break;
        }
        match GameMessage::decode(&mut reader, limits) {
            Ok(message) => messages.push(message),
            Err(err) => {
                tracing::warn!(
                    offset = reader.position(),
                    error = %err,
                    "discarding malformed game message"
                );
                error = Some(err);
                break;
            }
        }
    }

    tracing::debug!(
        count = messages.len(),
        consumed = reader.position(),
        "decoded message batch"
    );
    MessageBatch {
        messages,
        consumed: reader.position(),
        error,
    }
}

/// Encodes several messages back to back.
pub fn encode_messages<'a, I>(messages: I) -> WireResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a GameMessage>,
{
    let mut writer = ByteWriter::new();
    for message in messages {
        message.encode(&mut writer)?;
    }
    Ok(writer.finish())
}
