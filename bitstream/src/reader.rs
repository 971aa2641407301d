//! Cursor-based reader with bounded operations.

use crate::error::{StreamError, StreamResult};
use crate::writer::MAX_VARINT_LEN;
use crate::zigzag::{dequantize, zigzag_decode};

/// A cursor over an immutable byte slice for decoding wire primitives.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input, and a failed read leaves
/// the cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail of the buffer.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Reads a single raw byte.
    pub fn read_u8(&mut self) -> StreamResult<u8> {
        self.ensure_bytes(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> StreamResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads an unsigned varint of up to 64 bits.
    pub fn read_var_u64(&mut self) -> StreamResult<u64> {
        let start = self.pos;
        let mut result = 0u64;
        for index in 0..MAX_VARINT_LEN {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(err) => {
                    self.pos = start;
                    return Err(err);
                }
            };
            // The tenth byte only has room for the top bit.
            if index == MAX_VARINT_LEN - 1 && byte > 1 {
                self.pos = start;
                return Err(StreamError::InvalidVarint { max_bits: 64 });
            }
            result |= u64::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        self.pos = start;
        Err(StreamError::InvalidVarint { max_bits: 64 })
    }

    /// Reads an unsigned varint that must fit in 32 bits.
    pub fn read_var_u32(&mut self) -> StreamResult<u32> {
        let start = self.pos;
        let value = self.read_var_u64()?;
        u32::try_from(value).map_err(|_| {
            self.pos = start;
            StreamError::InvalidVarint { max_bits: 32 }
        })
    }

    /// Reads a signed varint by reinterpreting its 64-bit payload as two's complement.
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_var_i64(&mut self) -> StreamResult<i64> {
        Ok(self.read_var_u64()? as i64)
    }

    /// Reads a signed varint that must fit in 32 bits.
    pub fn read_var_i32(&mut self) -> StreamResult<i32> {
        let start = self.pos;
        let value = self.read_var_i64()?;
        i32::try_from(value).map_err(|_| {
            self.pos = start;
            StreamError::InvalidVarint { max_bits: 32 }
        })
    }

    /// Reads a little-endian fixed-width 32-bit integer.
    pub fn read_fixed_u32(&mut self) -> StreamResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian fixed-width signed 32-bit integer.
    pub fn read_fixed_i32(&mut self) -> StreamResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a zigzag varint and converts it back from fixed point.
    pub fn read_zigzag_f32(&mut self, precision: u8) -> StreamResult<f32> {
        let value = zigzag_decode(self.read_var_u64()?);
        Ok(dequantize(value, precision))
    }

    /// Reads a varint byte-length prefix followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> StreamResult<String> {
        let start = self.pos;
        let result = self.read_string_inner();
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn read_string_inner(&mut self) -> StreamResult<String> {
        let length = self.read_var_u64()?;
        let len = usize::try_from(length).map_err(|_| StreamError::LengthOverflow { length })?;
        let bytes = self.read_bytes(len)?;
        let value = std::str::from_utf8(bytes).map_err(|_| StreamError::InvalidUtf8 { len })?;
        Ok(value.to_owned())
    }

    fn ensure_bytes(&self, bytes: usize) -> StreamResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(StreamError::TruncatedInput {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> StreamResult<[u8; N]> {
        self.ensure_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}
