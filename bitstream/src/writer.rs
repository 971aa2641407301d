//! Append-only writer for wire primitives.

use crate::zigzag::{quantize, zigzag_encode};

/// Maximum encoded size of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// An append-only byte writer for encoding wire primitives.
///
/// Writes never fail; the buffer grows as needed. Call [`finish`](Self::finish)
/// to take the encoded bytes.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes a single raw byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes an unsigned varint: 7 bits per byte, low to high, high bit = continuation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_var_u64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.bytes.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.bytes.push(value as u8);
    }

    /// Writes an unsigned 32-bit varint.
    pub fn write_var_u32(&mut self, value: u32) {
        self.write_var_u64(u64::from(value));
    }

    /// Writes a signed varint as its two's complement bit pattern.
    ///
    /// Negative values always take the full ten bytes.
    #[allow(clippy::cast_sign_loss)]
    pub fn write_var_i64(&mut self, value: i64) {
        self.write_var_u64(value as u64);
    }

    /// Writes a signed 32-bit varint, sign-extended to 64 bits.
    pub fn write_var_i32(&mut self, value: i32) {
        self.write_var_i64(i64::from(value));
    }

    /// Writes a little-endian fixed-width 32-bit integer.
    pub fn write_fixed_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian fixed-width signed 32-bit integer.
    pub fn write_fixed_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a float as a zigzag varint of its fixed-point quantization.
    pub fn write_zigzag_f32(&mut self, value: f32, precision: u8) {
        self.write_var_u64(zigzag_encode(quantize(value, precision)));
    }

    /// Writes a varint byte-length prefix followed by the raw UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) {
        self.write_var_u64(value.len() as u64);
        self.bytes.extend_from_slice(value.as_bytes());
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

/// Returns the encoded length of an unsigned varint.
#[must_use]
pub const fn var_u64_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}
