//! Schema-level errors.

use thiserror::Error;

use crate::DataRef;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while resolving data references or compacting property ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The reference is not present in the resolution table.
    #[error("data reference {reference} has no wire code")]
    UnknownDataRef { reference: DataRef },

    /// The wire code is not present in the resolution table.
    #[error("wire code {code} does not name a data reference")]
    UnknownDataCode { code: u64 },

    /// A table entry would map one side to two values.
    #[error("data reference {reference} or code {code} already mapped")]
    DuplicateDataRef { reference: DataRef, code: u64 },

    /// The property id does not follow the power-property bit layout.
    #[error("property id 0x{id:X} is not a power property")]
    NotPowerProperty { id: u64 },

    /// The wire hash has bits set above the hashed window.
    #[error("property hash 0x{hash:X} is wider than the hash window")]
    InvalidPropertyHash { hash: u64 },
}
