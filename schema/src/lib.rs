//! Shared vocabulary of the arcwire archive protocol.
//!
//! This crate defines the pieces every archive layer agrees on:
//! - The power property id hash transform
//! - Data references and the table that maps them to wire codes
//! - Replication policy and locomotion bitmasks
//! - Field codec descriptors and per-field float precisions
//! - Deterministic layout fingerprints
//!
//! # Design Principles
//!
//! - **Explicit tables** - Data-reference resolution is injected, never global.
//! - **Legacy constants stay literal** - Bit windows and precisions match captured traffic.
//! - **Deterministic hashing** - A layout hash is stable given the same slot sequence.

mod data_ref;
mod error;
mod field;
mod hash;
mod policy;
mod property;

pub use data_ref::{decode_data_ref, encode_data_ref, DataRef, DataRefMap, DataRefTable, IdentityTable};
pub use error::{SchemaError, SchemaResult};
pub use field::{
    FieldCodec, MOVE_SPEED_PRECISION, ORIENTATION_PRECISION, POSITION_PRECISION, RANGE_PRECISION,
};
pub use hash::layout_hash;
pub use policy::{LocomotionMessageFlags, ReplicationPolicy};
pub use property::{
    checked_property_hash, checked_property_unhash, is_power_property, property_hash,
    property_unhash, reverse_window, POWER_PROPERTY_TAG, PROPERTY_HASH_BITS, PROPERTY_HASH_SHIFT,
};
