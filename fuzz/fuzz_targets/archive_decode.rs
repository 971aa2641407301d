#![no_main]

use codec::{
    decode_archive, encode_archive, CodecLimits, Player, PowerPropertyUpdate, RegionArchive,
    UpdateAvatarStateArchive,
};
use libfuzzer_sys::fuzz_target;
use schema::IdentityTable;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bytes)) = data.split_first() else {
        return;
    };
    let limits = CodecLimits::for_testing();

    match selector % 4 {
        0 => {
            if let Ok(mut player) = decode_archive::<Player>(bytes, &IdentityTable, &limits) {
                let _ = encode_archive(&mut player, &IdentityTable);
            }
        }
        1 => {
            let _ = decode_archive::<RegionArchive>(bytes, &IdentityTable, &limits);
        }
        2 => {
            let _ = decode_archive::<UpdateAvatarStateArchive>(bytes, &IdentityTable, &limits);
        }
        _ => {
            if let Ok(mut update) = decode_archive::<PowerPropertyUpdate>(bytes, &IdentityTable, &limits) {
                let reencoded = encode_archive(&mut update, &IdentityTable);
                assert!(reencoded.is_ok());
            }
        }
    }
});
