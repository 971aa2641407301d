//! Incremental property update addressed by replication id.

use schema::{checked_property_hash, checked_property_unhash};

use crate::archive::{Archive, ArchiveMode, ArchiveObject};
use crate::error::CodecResult;

/// Sets one power property on a live property collection.
///
/// Wire layout: `[varint replication id][varint property hash][varint value]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerPropertyUpdate {
    pub replication_id: u64,
    pub property_id: u64,
    pub value: u64,
}

impl ArchiveObject for PowerPropertyUpdate {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.replication_id)?;
        let mut hash = match ar.mode() {
            ArchiveMode::Write => checked_property_hash(self.property_id)?,
            _ => 0,
        };
        ar.var_u64(&mut hash)?;
        if ar.is_reading() {
            self.property_id = checked_property_unhash(hash)?;
        }
        ar.var_u64(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{decode_archive, encode_archive};
    use crate::{CodecError, CodecLimits};
    use schema::{IdentityTable, SchemaError, POWER_PROPERTY_TAG};

    #[test]
    fn update_layout() {
        let mut update = PowerPropertyUpdate {
            replication_id: 5,
            property_id: (1 << 12) | POWER_PROPERTY_TAG,
            value: 3,
        };
        let bytes = encode_archive(&mut update, &IdentityTable).unwrap();
        // window 1 reversed across 14 bits = 0x2000
        assert_eq!(bytes, vec![0x05, 0x80, 0x40, 0x03]);

        let decoded: PowerPropertyUpdate =
            decode_archive(&bytes, &IdentityTable, &CodecLimits::default()).unwrap();
        assert_eq!(decoded, update);
    }

    #[test]
    fn non_power_property_rejected() {
        let mut update = PowerPropertyUpdate {
            replication_id: 5,
            property_id: 0x1234,
            value: 1,
        };
        let err = encode_archive(&mut update, &IdentityTable).unwrap_err();
        assert_eq!(
            err,
            CodecError::Schema(SchemaError::NotPowerProperty { id: 0x1234 })
        );
    }

    #[test]
    fn hash_outside_window_rejected() {
        // hash 0x4001 sets bit 14
        let bytes = [0x05, 0x81, 0x80, 0x01, 0x03];
        let err = decode_archive::<PowerPropertyUpdate>(&bytes, &IdentityTable, &CodecLimits::default())
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::Schema(SchemaError::InvalidPropertyHash { hash: 0x4001 })
        );

        let widest = [0x05, 0xFF, 0x7F, 0x03];
        let decoded: PowerPropertyUpdate =
            decode_archive(&widest, &IdentityTable, &CodecLimits::default()).unwrap();
        assert_eq!(decoded.property_id, ((1 << 26) - (1 << 12)) | POWER_PROPERTY_TAG);
    }
}
