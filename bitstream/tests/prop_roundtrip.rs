use bitstream::zigzag::{zigzag_decode, zigzag_encode};
use bitstream::{var_u64_len, BoolDecoder, BoolEncoder, ByteReader, ByteWriter, BOOLS_PER_BYTE};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Byte(u8),
    VarU64(u64),
    VarI64(i64),
    VarU32(u32),
    FixedI32(i32),
    Str(String),
    Bool(bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Byte),
        any::<u64>().prop_map(Op::VarU64),
        any::<i64>().prop_map(Op::VarI64),
        any::<u32>().prop_map(Op::VarU32),
        any::<i32>().prop_map(Op::FixedI32),
        ".{0,24}".prop_map(Op::Str),
        any::<bool>().prop_map(Op::Bool),
    ]
}

proptest! {
    #[test]
    fn prop_interleaved_ops_roundtrip(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut encoder = BoolEncoder::new();
        for op in &ops {
            if let Op::Bool(value) = op {
                encoder.observe(*value);
            }
        }
        let mut cooked = encoder.cook();

        let mut writer = ByteWriter::new();
        for op in &ops {
            match op {
                Op::Byte(v) => writer.write_u8(*v),
                Op::VarU64(v) => writer.write_var_u64(*v),
                Op::VarI64(v) => writer.write_var_i64(*v),
                Op::VarU32(v) => writer.write_var_u32(*v),
                Op::FixedI32(v) => writer.write_fixed_i32(*v),
                Op::Str(v) => writer.write_string(v),
                Op::Bool(_) => {
                    cooked.write_next(&mut writer).unwrap();
                }
            }
        }
        prop_assert_eq!(cooked.remaining(), 0);
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        let mut decoder = BoolDecoder::new();
        for op in &ops {
            match op {
                Op::Byte(v) => prop_assert_eq!(reader.read_u8().unwrap(), *v),
                Op::VarU64(v) => prop_assert_eq!(reader.read_var_u64().unwrap(), *v),
                Op::VarI64(v) => prop_assert_eq!(reader.read_var_i64().unwrap(), *v),
                Op::VarU32(v) => prop_assert_eq!(reader.read_var_u32().unwrap(), *v),
                Op::FixedI32(v) => prop_assert_eq!(reader.read_fixed_i32().unwrap(), *v),
                Op::Str(v) => prop_assert_eq!(&reader.read_string().unwrap(), v),
                Op::Bool(v) => prop_assert_eq!(decoder.read_bool(&mut reader).unwrap(), *v),
            }
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_var_u64_minimal_length(value in any::<u64>()) {
        let mut writer = ByteWriter::new();
        writer.write_var_u64(value);
        let bytes = writer.finish();
        prop_assert_eq!(bytes.len(), var_u64_len(value));
        prop_assert!(bytes.len() <= 10);
        // Only the last byte may have the continuation bit cleared.
        for byte in &bytes[..bytes.len() - 1] {
            prop_assert!(byte & 0x80 != 0);
        }
        prop_assert!(bytes[bytes.len() - 1] & 0x80 == 0);
    }

    #[test]
    fn prop_zigzag_inverse(value in any::<i64>()) {
        prop_assert_eq!(zigzag_decode(zigzag_encode(value)), value);
    }

    #[test]
    fn prop_zigzag_float_error_bound(value in -100_000.0f32..100_000.0, precision in 0u8..=6) {
        let mut writer = ByteWriter::new();
        writer.write_zigzag_f32(value, precision);
        let bytes = writer.finish();
        let decoded = ByteReader::new(&bytes).read_zigzag_f32(precision).unwrap();
        let step = 1.0f64 / f64::from(1u32 << precision);
        let error = (f64::from(decoded) - f64::from(value)).abs();
        // Below 2^17 at six fractional bits every quantized value is exact in f32.
        prop_assert!(error <= step / 2.0, "error {} over half step {}", error, step);
    }

    #[test]
    fn prop_cooked_block_size(values in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut encoder = BoolEncoder::new();
        for value in &values {
            encoder.observe(*value);
        }
        let cooked = encoder.cook();
        prop_assert_eq!(cooked.len(), values.len());
        prop_assert_eq!(cooked.as_bytes().len(), values.len().div_ceil(BOOLS_PER_BYTE));

        let mut reader = ByteReader::new(cooked.as_bytes());
        let mut decoder = BoolDecoder::new();
        for value in &values {
            prop_assert_eq!(decoder.read_bool(&mut reader).unwrap(), *value);
        }
        prop_assert!(reader.is_empty());
    }
}
