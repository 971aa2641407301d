#![no_main]

use bitstream::{BoolDecoder, ByteReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut bools = BoolDecoder::new();
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 7;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_var_u64();
            }
            1 => {
                let _ = reader.read_var_i32();
            }
            2 => {
                let _ = reader.read_fixed_u32();
            }
            3 => {
                let precision = data[idx.saturating_sub(1)] % 8;
                let _ = reader.read_zigzag_f32(precision);
            }
            4 => {
                let _ = reader.read_string();
            }
            5 => {
                let _ = bools.read_bool(&mut reader);
            }
            _ => {
                let _ = reader.read_u8();
            }
        }
    }
});
