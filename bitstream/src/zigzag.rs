//! Zigzag mapping and fixed-point float quantization.
//!
//! Floats travel as signed fixed-point integers with a per-field number of
//! fractional bits, zigzag-mapped so small negative values stay short as
//! varints.

/// Maps a signed integer onto an unsigned one (`n >= 0 -> 2n`, `n < 0 -> -2n - 1`).
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Quantizes a float to a fixed-point integer with `precision` fractional bits.
///
/// Rounds to nearest; values outside the `i64` range saturate and NaN maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quantize(value: f32, precision: u8) -> i64 {
    let scaled = f64::from(value) * scale(precision);
    scaled.round() as i64
}

/// Converts a fixed-point integer with `precision` fractional bits back to a float.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn dequantize(value: i64, precision: u8) -> f32 {
    (value as f64 / scale(precision)) as f32
}

fn scale(precision: u8) -> f64 {
    2f64.powi(i32::from(precision))
}
