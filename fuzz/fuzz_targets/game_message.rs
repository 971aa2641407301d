#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{decode_messages, encode_messages, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();
    let batch = decode_messages(data, &limits);
    assert!(batch.consumed <= data.len());
    assert!(batch.messages.len() <= limits.max_messages);
    assert_eq!(batch.is_complete(), batch.consumed == data.len());

    // Re-encoding never grows past the input; varints come out minimal.
    let bytes = encode_messages(&batch.messages).expect("decoded messages re-encode");
    assert!(bytes.len() <= batch.consumed);
});
