//! References to static game data and their compact wire codes.
//!
//! Archives never carry data names. A field that points at a data definition
//! is written as the numeric code a [`DataRefTable`] assigns to it, and the
//! code `0` always means "no reference".

use std::collections::HashMap;
use std::fmt;

use crate::error::{SchemaError, SchemaResult};

/// A stable reference to a static data definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DataRef(pub u64);

impl DataRef {
    /// The empty reference.
    pub const NONE: Self = Self(0);

    /// Returns `true` for the empty reference.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DataRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional mapping between data references and wire codes.
pub trait DataRefTable {
    /// Returns the wire code for `reference`, if it is known.
    fn to_code(&self, reference: DataRef) -> Option<u64>;

    /// Returns the reference behind `code`, if it is known.
    fn from_code(&self, code: u64) -> Option<DataRef>;
}

/// Encodes a reference for the wire. [`DataRef::NONE`] always maps to `0`.
pub fn encode_data_ref(table: &dyn DataRefTable, reference: DataRef) -> SchemaResult<u64> {
    if reference.is_none() {
        return Ok(0);
    }
    match table.to_code(reference) {
        Some(0) | None => Err(SchemaError::UnknownDataRef { reference }),
        Some(code) => Ok(code),
    }
}

/// Decodes a wire code. `0` always maps to [`DataRef::NONE`].
pub fn decode_data_ref(table: &dyn DataRefTable, code: u64) -> SchemaResult<DataRef> {
    if code == 0 {
        return Ok(DataRef::NONE);
    }
    table
        .from_code(code)
        .ok_or(SchemaError::UnknownDataCode { code })
}

/// Table that uses the reference value itself as its code.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTable;

impl DataRefTable for IdentityTable {
    fn to_code(&self, reference: DataRef) -> Option<u64> {
        Some(reference.0)
    }

    fn from_code(&self, code: u64) -> Option<DataRef> {
        Some(DataRef(code))
    }
}

/// In-memory table loaded from a game-data directory listing.
#[derive(Debug, Clone, Default)]
pub struct DataRefMap {
    to_code: HashMap<DataRef, u64>,
    from_code: HashMap<u64, DataRef>,
}

impl DataRefMap {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping. Both sides must be unused and non-zero.
    pub fn insert(&mut self, reference: DataRef, code: u64) -> SchemaResult<()> {
        if reference.is_none()
            || code == 0
            || self.to_code.contains_key(&reference)
            || self.from_code.contains_key(&code)
        {
            return Err(SchemaError::DuplicateDataRef { reference, code });
        }
        self.to_code.insert(reference, code);
        self.from_code.insert(code, reference);
        Ok(())
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_code.len()
    }

    /// Returns `true` if the table has no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_code.is_empty()
    }
}

impl DataRefTable for DataRefMap {
    fn to_code(&self, reference: DataRef) -> Option<u64> {
        self.to_code.get(&reference).copied()
    }

    fn from_code(&self, code: u64) -> Option<DataRef> {
        self.from_code.get(&code).copied()
    }
}

impl FromIterator<(DataRef, u64)> for DataRefMap {
    /// Builds a table, keeping the first mapping when entries conflict.
    fn from_iter<I: IntoIterator<Item = (DataRef, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (reference, code) in iter {
            let _ = map.insert(reference, code);
        }
        map
    }
}
