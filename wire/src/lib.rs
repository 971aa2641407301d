//! Message framing for the arcwire archive protocol.
//!
//! This crate wraps opaque protocol payloads in the `GameMessage` envelope
//! (`[varint id][varint length][payload]`) and splits received buffers back
//! into messages. It does not know about archive types, only the structure
//! of envelopes.
//!
//! # Design Principles
//!
//! - **Stable wire format** - The envelope matches the fixed client exactly.
//! - **Bounded decoding** - Declared lengths are validated against limits before any read.
//! - **Message-scoped failure** - A bad envelope is discarded without disturbing earlier ones.

mod error;
mod limits;
mod message;

pub use error::{FramingError, WireResult};
pub use limits::Limits;
pub use message::{decode_messages, encode_messages, GameMessage, MessageBatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Limits::default();
        let _ = GameMessage::new(0, Vec::new());
        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn batch_roundtrip() {
        let messages = vec![
            GameMessage::new(1, b"hello".to_vec()),
            GameMessage::new(255, Vec::new()),
            GameMessage::new(0, vec![0u8; 200]),
        ];
        let bytes = encode_messages(&messages).unwrap();
        let batch = decode_messages(&bytes, &Limits::default());
        assert!(batch.is_complete());
        assert_eq!(batch.consumed, bytes.len());
        assert_eq!(batch.messages, messages);
    }
}
