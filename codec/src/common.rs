//! Building blocks shared by several archives.

use crate::archive::{transfer_fixed_list, Archive, ArchiveObject};
use crate::error::CodecResult;

/// Three floats written with one precision.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Transfers all three components as zigzag floats.
    pub fn transfer_with<A: Archive>(&mut self, ar: &mut A, precision: u8) -> CodecResult<()> {
        ar.zigzag_f32(&mut self.x, precision)?;
        ar.zigzag_f32(&mut self.y, precision)?;
        ar.zigzag_f32(&mut self.z, precision)
    }
}

/// One property id and its raw value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyEntry {
    pub id: u64,
    pub value: u64,
}

impl ArchiveObject for PropertyEntry {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.id)?;
        ar.var_u64(&mut self.value)
    }
}

/// Property collection addressable by replication id.
///
/// Wire layout: `[varint replication id][fixed32 count][(varint id, varint value)*]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicatedPropertyCollection {
    pub replication_id: u64,
    pub properties: Vec<PropertyEntry>,
}

impl ReplicatedPropertyCollection {
    #[must_use]
    pub fn new(replication_id: u64) -> Self {
        Self {
            replication_id,
            properties: Vec::new(),
        }
    }

    /// Returns the value stored for `id`.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<u64> {
        self.properties
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.value)
    }

    /// Sets `id` to `value`, appending it if it is not present yet.
    pub fn set(&mut self, id: u64, value: u64) {
        match self.properties.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.value = value,
            None => self.properties.push(PropertyEntry { id, value }),
        }
    }
}

impl ArchiveObject for ReplicatedPropertyCollection {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.replication_id)?;
        transfer_fixed_list(ar, &mut self.properties)
    }
}

/// A single value addressable by replication id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicatedVariable<T> {
    pub replication_id: u64,
    pub value: T,
}

impl<T> ReplicatedVariable<T> {
    #[must_use]
    pub const fn new(replication_id: u64, value: T) -> Self {
        Self {
            replication_id,
            value,
        }
    }
}

impl<T: ArchiveObject> ArchiveObject for ReplicatedVariable<T> {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.replication_id)?;
        self.value.transfer(ar)
    }
}
