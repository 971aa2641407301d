//! Boolean cooking: packing scattered boolean fields into dense bytes.
//!
//! Each packed byte holds up to [`BOOLS_PER_BYTE`] values. The first value of
//! a group sits in bit 7, the next in bit 6 and so on down to bit 3; the low
//! three bits store how many values the byte carries (1..=5). This layout is
//! fixed by the client and must not change.
//!
//! Encoding is two-phase. [`BoolEncoder::observe`] collects every boolean of
//! an archive in traversal order, then [`BoolEncoder::cook`] packs them. The
//! write pass replays the same traversal and calls
//! [`CookedBools::write_next`] at every boolean slot; a packed byte is emitted
//! at the first slot of each group and the remaining slots of the group emit
//! nothing. [`BoolDecoder::read_bool`] mirrors this by pulling a fresh byte
//! from the wire whenever its current one runs out.

use crate::error::{StreamError, StreamResult};
use crate::reader::ByteReader;
use crate::writer::ByteWriter;

/// Maximum number of booleans packed into one byte.
pub const BOOLS_PER_BYTE: usize = 5;

const COUNT_MASK: u8 = 0b111;
const FIRST_VALUE_BIT: u8 = 0x80;

/// Collects booleans in observation order during the collect pass.
#[derive(Debug, Default, Clone)]
pub struct BoolEncoder {
    values: Vec<bool>,
}

impl BoolEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one boolean. Nothing is written to the wire yet.
    pub fn observe(&mut self, value: bool) {
        self.values.push(value);
    }

    /// Returns the number of observed booleans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Packs the observed booleans for the write pass.
    #[must_use]
    pub fn cook(self) -> CookedBools {
        let packed = self.values.chunks(BOOLS_PER_BYTE).map(pack_group).collect();
        CookedBools {
            packed,
            count: self.values.len(),
            next: 0,
        }
    }
}

/// Packs up to five booleans into one byte.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn pack_group(values: &[bool]) -> u8 {
    debug_assert!(!values.is_empty() && values.len() <= BOOLS_PER_BYTE);
    let mut byte = values.len() as u8 & COUNT_MASK;
    for (index, value) in values.iter().enumerate() {
        if *value {
            byte |= FIRST_VALUE_BIT >> index;
        }
    }
    byte
}

/// Finalized boolean block, replayed slot by slot during the write pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookedBools {
    packed: Vec<u8>,
    count: usize,
    next: usize,
}

impl CookedBools {
    /// Returns the packed block: every cooked byte, in order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.packed
    }

    /// Returns the number of cooked booleans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no booleans were cooked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots not yet written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.count - self.next
    }

    /// Writes the next boolean slot and returns the value it carries.
    ///
    /// Emits a packed byte only at the first slot of a group.
    pub fn write_next(&mut self, writer: &mut ByteWriter) -> StreamResult<bool> {
        if self.next >= self.count {
            return Err(StreamError::BoolsExhausted {
                index: self.next,
                cooked: self.count,
            });
        }
        let byte = self.packed[self.next / BOOLS_PER_BYTE];
        let slot = self.next % BOOLS_PER_BYTE;
        if slot == 0 {
            writer.write_u8(byte);
        }
        self.next += 1;
        Ok(byte & (FIRST_VALUE_BIT >> slot) != 0)
    }
}

/// Replays packed booleans during decode, one per call.
#[derive(Debug, Default, Clone)]
pub struct BoolDecoder {
    current: u8,
    count: u8,
    consumed: u8,
}

impl BoolDecoder {
    /// Creates a decoder with no buffered byte.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: 0,
            count: 0,
            consumed: 0,
        }
    }

    /// Returns `true` if the buffered byte has no values left.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.consumed >= self.count
    }

    /// Number of values left in the buffered byte.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.count.saturating_sub(self.consumed) as usize
    }

    /// Reads the next boolean, pulling a packed byte from `reader` when needed.
    pub fn read_bool(&mut self, reader: &mut ByteReader<'_>) -> StreamResult<bool> {
        if self.is_empty() {
            // Only the final group may hold fewer than five values.
            if self.count != 0 && usize::from(self.count) < BOOLS_PER_BYTE {
                return Err(StreamError::BoolsAfterShortGroup { count: self.count });
            }
            let byte = reader.read_u8()?;
            let count = byte & COUNT_MASK;
            if count == 0 || usize::from(count) > BOOLS_PER_BYTE {
                return Err(StreamError::InvalidBoolBlock { byte });
            }
            self.current = byte;
            self.count = count;
            self.consumed = 0;
        }
        let value = self.current & (FIRST_VALUE_BIT >> self.consumed) != 0;
        self.consumed += 1;
        Ok(value)
    }
}
