//! Byte-level wire primitives for the arcwire archive protocol.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for the primitive
//! encodings every archive is built from, plus the boolean cooker that packs
//! scattered boolean fields into shared bytes.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked and never panic.
//! - **No domain knowledge** - This crate knows nothing about players, regions, or messages.
//! - **Explicit errors** - All failures return structured errors.
//!
//! # Example
//!
//! ```
//! use bitstream::{BoolDecoder, BoolEncoder, ByteReader, ByteWriter};
//!
//! let mut encoder = BoolEncoder::new();
//! encoder.observe(true);
//! let mut cooked = encoder.cook();
//!
//! let mut writer = ByteWriter::new();
//! writer.write_var_u64(300);
//! cooked.write_next(&mut writer).unwrap();
//! writer.write_string("Gear");
//! let bytes = writer.finish();
//! assert_eq!(bytes, [0xAC, 0x02, 0x81, 0x04, b'G', b'e', b'a', b'r']);
//!
//! let mut reader = ByteReader::new(&bytes);
//! let mut bools = BoolDecoder::new();
//! assert_eq!(reader.read_var_u64().unwrap(), 300);
//! assert!(bools.read_bool(&mut reader).unwrap());
//! assert_eq!(reader.read_string().unwrap(), "Gear");
//! ```

mod cooker;
mod error;
mod reader;
mod writer;
pub mod zigzag;

pub use cooker::{pack_group, BoolDecoder, BoolEncoder, CookedBools, BOOLS_PER_BYTE};
pub use error::{StreamError, StreamResult};
pub use reader::ByteReader;
pub use writer::{var_u64_len, ByteWriter, MAX_VARINT_LEN};
