//! Single-traversal archive protocol.
//!
//! Every archive type implements [`ArchiveObject::transfer`] once. That one
//! function fixes the field order, and it is driven by four archivers:
//!
//! - [`BoolCollector`] observes boolean slots and ignores everything else.
//! - [`ArchiveWriter`] writes primitives and replays cooked booleans.
//! - [`ArchiveReader`] fills a default instance from the wire.
//! - [`LayoutRecorder`] records the codec of every slot visited.
//!
//! Because collect, write and read all run the same function, the boolean
//! slots can never be visited in a different order on one path than on
//! another.

use bitstream::{BoolDecoder, BoolEncoder, ByteReader, ByteWriter, CookedBools};
use schema::{
    decode_data_ref, encode_data_ref, DataRef, DataRefTable, FieldCodec, ReplicationPolicy,
};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;

/// What an archiver does with the values it visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMode {
    Collect,
    Write,
    Read,
    Layout,
}

/// Visitor over the slots of an archive.
///
/// In [`ArchiveMode::Read`] every method overwrites its argument; in every
/// other mode arguments are only read.
pub trait Archive {
    /// Returns the mode of this archiver.
    fn mode(&self) -> ArchiveMode;

    /// Returns `true` if values are being filled from the wire.
    fn is_reading(&self) -> bool {
        self.mode() == ArchiveMode::Read
    }

    /// Cooked boolean slot.
    fn bool(&mut self, value: &mut bool) -> CodecResult<()>;

    /// Unsigned varint, 32-bit range.
    fn var_u32(&mut self, value: &mut u32) -> CodecResult<()>;

    /// Unsigned varint, 64-bit range.
    fn var_u64(&mut self, value: &mut u64) -> CodecResult<()>;

    /// Two's complement varint, 32-bit range.
    fn var_i32(&mut self, value: &mut i32) -> CodecResult<()>;

    /// Two's complement varint, 64-bit range.
    fn var_i64(&mut self, value: &mut i64) -> CodecResult<()>;

    /// Little-endian fixed 32-bit integer.
    fn fixed_i32(&mut self, value: &mut i32) -> CodecResult<()>;

    /// Zigzag varint of a fixed-point float with `precision` fractional bits.
    fn zigzag_f32(&mut self, value: &mut f32, precision: u8) -> CodecResult<()>;

    /// Length-prefixed UTF-8 string.
    fn string(&mut self, value: &mut String) -> CodecResult<()>;

    /// Data reference, written as its table code.
    fn data_ref(&mut self, value: &mut DataRef) -> CodecResult<()>;

    /// Replication policy, written as a 32-bit varint.
    fn policy(&mut self, value: &mut ReplicationPolicy) -> CodecResult<()>;

    /// Varint element count. Returns the count to iterate over.
    fn count(&mut self, len: usize) -> CodecResult<usize>;

    /// Fixed 32-bit element count. Returns the count to iterate over.
    fn fixed_count(&mut self, len: usize) -> CodecResult<usize>;
}

/// A type with a fixed archive layout.
pub trait ArchiveObject {
    /// Visits every slot of `self` in wire order.
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()>;
}

/// Transfers a varint-counted list.
pub fn transfer_list<A, T>(ar: &mut A, items: &mut Vec<T>) -> CodecResult<()>
where
    A: Archive,
    T: ArchiveObject + Default,
{
    let len = ar.count(items.len())?;
    transfer_items(ar, items, len)
}

/// Transfers a list whose count is a fixed 32-bit integer.
pub fn transfer_fixed_list<A, T>(ar: &mut A, items: &mut Vec<T>) -> CodecResult<()>
where
    A: Archive,
    T: ArchiveObject + Default,
{
    let len = ar.fixed_count(items.len())?;
    transfer_items(ar, items, len)
}

fn transfer_items<A, T>(ar: &mut A, items: &mut Vec<T>, len: usize) -> CodecResult<()>
where
    A: Archive,
    T: ArchiveObject + Default,
{
    if ar.is_reading() {
        items.clear();
        items.resize_with(len, T::default);
    }
    for item in items.iter_mut() {
        item.transfer(ar)?;
    }
    Ok(())
}

/// Transfers an optional sub-archive behind a cooked presence flag.
///
/// Absence is represented by omission: nothing follows a `false` flag.
pub fn transfer_optional<A, T>(ar: &mut A, value: &mut Option<T>) -> CodecResult<()>
where
    A: Archive,
    T: ArchiveObject + Default,
{
    let mut present = value.is_some();
    ar.bool(&mut present)?;
    if ar.is_reading() {
        *value = present.then(T::default);
    }
    if let Some(inner) = value {
        inner.transfer(ar)?;
    }
    Ok(())
}

impl ArchiveObject for DataRef {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.data_ref(self)
    }
}

impl ArchiveObject for u32 {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u32(self)
    }
}

impl ArchiveObject for u64 {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(self)
    }
}

impl ArchiveObject for i64 {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_i64(self)
    }
}

impl ArchiveObject for String {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.string(self)
    }
}

/// Collect pass: observes boolean slots in traversal order.
#[derive(Debug, Default)]
pub struct BoolCollector {
    encoder: BoolEncoder,
}

impl BoolCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Packs the observed booleans for the write pass.
    #[must_use]
    pub fn finish(self) -> CookedBools {
        self.encoder.cook()
    }
}

impl Archive for BoolCollector {
    fn mode(&self) -> ArchiveMode {
        ArchiveMode::Collect
    }

    fn bool(&mut self, value: &mut bool) -> CodecResult<()> {
        self.encoder.observe(*value);
        Ok(())
    }

    fn var_u32(&mut self, _value: &mut u32) -> CodecResult<()> {
        Ok(())
    }

    fn var_u64(&mut self, _value: &mut u64) -> CodecResult<()> {
        Ok(())
    }

    fn var_i32(&mut self, _value: &mut i32) -> CodecResult<()> {
        Ok(())
    }

    fn var_i64(&mut self, _value: &mut i64) -> CodecResult<()> {
        Ok(())
    }

    fn fixed_i32(&mut self, _value: &mut i32) -> CodecResult<()> {
        Ok(())
    }

    fn zigzag_f32(&mut self, _value: &mut f32, _precision: u8) -> CodecResult<()> {
        Ok(())
    }

    fn string(&mut self, _value: &mut String) -> CodecResult<()> {
        Ok(())
    }

    fn data_ref(&mut self, _value: &mut DataRef) -> CodecResult<()> {
        Ok(())
    }

    fn policy(&mut self, _value: &mut ReplicationPolicy) -> CodecResult<()> {
        Ok(())
    }

    fn count(&mut self, len: usize) -> CodecResult<usize> {
        Ok(len)
    }

    fn fixed_count(&mut self, len: usize) -> CodecResult<usize> {
        Ok(len)
    }
}

/// Write pass: emits primitives and replays cooked booleans.
pub struct ArchiveWriter<'t> {
    out: ByteWriter,
    bools: CookedBools,
    refs: &'t dyn DataRefTable,
}

impl<'t> ArchiveWriter<'t> {
    /// Creates a writer replaying `bools`.
    #[must_use]
    pub fn new(bools: CookedBools, refs: &'t dyn DataRefTable) -> Self {
        Self {
            out: ByteWriter::new(),
            bools,
            refs,
        }
    }

    /// Returns the encoded bytes once every cooked boolean has been written.
    pub fn finish(self) -> CodecResult<Vec<u8>> {
        if self.bools.remaining() != 0 {
            return Err(CodecError::BoolCountMismatch {
                observed: self.bools.len(),
                written: self.bools.len() - self.bools.remaining(),
            });
        }
        Ok(self.out.finish())
    }
}

impl Archive for ArchiveWriter<'_> {
    fn mode(&self) -> ArchiveMode {
        ArchiveMode::Write
    }

    fn bool(&mut self, value: &mut bool) -> CodecResult<()> {
        let slot = self.bools.len() - self.bools.remaining();
        let cooked = self.bools.write_next(&mut self.out)?;
        if cooked != *value {
            return Err(CodecError::BoolDesync { slot });
        }
        Ok(())
    }

    fn var_u32(&mut self, value: &mut u32) -> CodecResult<()> {
        self.out.write_var_u32(*value);
        Ok(())
    }

    fn var_u64(&mut self, value: &mut u64) -> CodecResult<()> {
        self.out.write_var_u64(*value);
        Ok(())
    }

    fn var_i32(&mut self, value: &mut i32) -> CodecResult<()> {
        self.out.write_var_i32(*value);
        Ok(())
    }

    fn var_i64(&mut self, value: &mut i64) -> CodecResult<()> {
        self.out.write_var_i64(*value);
        Ok(())
    }

    fn fixed_i32(&mut self, value: &mut i32) -> CodecResult<()> {
        self.out.write_fixed_i32(*value);
        Ok(())
    }

    fn zigzag_f32(&mut self, value: &mut f32, precision: u8) -> CodecResult<()> {
        self.out.write_zigzag_f32(*value, precision);
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> CodecResult<()> {
        self.out.write_string(value);
        Ok(())
    }

    fn data_ref(&mut self, value: &mut DataRef) -> CodecResult<()> {
        let code = encode_data_ref(self.refs, *value)?;
        self.out.write_var_u64(code);
        Ok(())
    }

    fn policy(&mut self, value: &mut ReplicationPolicy) -> CodecResult<()> {
        self.out.write_var_u32(value.bits());
        Ok(())
    }

    fn count(&mut self, len: usize) -> CodecResult<usize> {
        self.out.write_var_u64(len as u64);
        Ok(len)
    }

    fn fixed_count(&mut self, len: usize) -> CodecResult<usize> {
        let fixed = u32::try_from(len).map_err(|_| CodecError::LimitsExceeded {
            kind: LimitKind::ListElements,
            limit: u32::MAX as usize,
            actual: len,
        })?;
        self.out.write_fixed_u32(fixed);
        Ok(len)
    }
}

/// Read pass: fills values from the wire.
pub struct ArchiveReader<'a, 't> {
    input: ByteReader<'a>,
    bools: BoolDecoder,
    refs: &'t dyn DataRefTable,
    limits: &'t CodecLimits,
}

impl<'a, 't> ArchiveReader<'a, 't> {
    /// Creates a reader over one archive payload.
    #[must_use]
    pub fn new(bytes: &'a [u8], refs: &'t dyn DataRefTable, limits: &'t CodecLimits) -> Self {
        Self {
            input: ByteReader::new(bytes),
            bools: BoolDecoder::new(),
            refs,
            limits,
        }
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.remaining()
    }

    /// Fails if any bytes or packed booleans were left unread.
    pub fn finish(self) -> CodecResult<()> {
        if !self.bools.is_empty() {
            return Err(CodecError::UnreadBools {
                remaining: self.bools.remaining(),
            });
        }
        match self.input.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::LengthMismatch { remaining }),
        }
    }

    fn checked_count(&self, count: u64) -> CodecResult<usize> {
        let len = usize::try_from(count).unwrap_or(usize::MAX);
        if len > self.limits.max_list_len {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::ListElements,
                limit: self.limits.max_list_len,
                actual: len,
            });
        }
        // Every list element in this protocol carries at least one byte.
        if len > self.input.remaining() {
            return Err(CodecError::CountExceedsInput {
                count,
                remaining: self.input.remaining(),
            });
        }
        Ok(len)
    }
}

impl Archive for ArchiveReader<'_, '_> {
    fn mode(&self) -> ArchiveMode {
        ArchiveMode::Read
    }

    fn bool(&mut self, value: &mut bool) -> CodecResult<()> {
        *value = self.bools.read_bool(&mut self.input)?;
        Ok(())
    }

    fn var_u32(&mut self, value: &mut u32) -> CodecResult<()> {
        *value = self.input.read_var_u32()?;
        Ok(())
    }

    fn var_u64(&mut self, value: &mut u64) -> CodecResult<()> {
        *value = self.input.read_var_u64()?;
        Ok(())
    }

    fn var_i32(&mut self, value: &mut i32) -> CodecResult<()> {
        *value = self.input.read_var_i32()?;
        Ok(())
    }

    fn var_i64(&mut self, value: &mut i64) -> CodecResult<()> {
        *value = self.input.read_var_i64()?;
        Ok(())
    }

    fn fixed_i32(&mut self, value: &mut i32) -> CodecResult<()> {
        *value = self.input.read_fixed_i32()?;
        Ok(())
    }

    fn zigzag_f32(&mut self, value: &mut f32, precision: u8) -> CodecResult<()> {
        *value = self.input.read_zigzag_f32(precision)?;
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> CodecResult<()> {
        let declared = self.input.clone().read_var_u64()?;
        let len = usize::try_from(declared).unwrap_or(usize::MAX);
        if len > self.limits.max_string_bytes {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::StringBytes,
                limit: self.limits.max_string_bytes,
                actual: len,
            });
        }
        *value = self.input.read_string()?;
        Ok(())
    }

    fn data_ref(&mut self, value: &mut DataRef) -> CodecResult<()> {
        let code = self.input.read_var_u64()?;
        *value = decode_data_ref(self.refs, code)?;
        Ok(())
    }

    fn policy(&mut self, value: &mut ReplicationPolicy) -> CodecResult<()> {
        *value = ReplicationPolicy::from_wire(self.input.read_var_u32()?);
        Ok(())
    }

    fn count(&mut self, _len: usize) -> CodecResult<usize> {
        let count = self.input.read_var_u64()?;
        self.checked_count(count)
    }

    fn fixed_count(&mut self, _len: usize) -> CodecResult<usize> {
        let count = self.input.read_fixed_u32()?;
        self.checked_count(u64::from(count))
    }
}

/// Layout pass: records the codec of every slot visited.
#[derive(Debug, Default)]
pub struct LayoutRecorder {
    slots: Vec<FieldCodec>,
}

impl LayoutRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded slot sequence.
    #[must_use]
    pub fn finish(self) -> Vec<FieldCodec> {
        self.slots
    }

    fn record(&mut self, codec: FieldCodec) -> CodecResult<()> {
        self.slots.push(codec);
        Ok(())
    }
}

impl Archive for LayoutRecorder {
    fn mode(&self) -> ArchiveMode {
        ArchiveMode::Layout
    }

    fn bool(&mut self, _value: &mut bool) -> CodecResult<()> {
        self.record(FieldCodec::Bool)
    }

    fn var_u32(&mut self, _value: &mut u32) -> CodecResult<()> {
        self.record(FieldCodec::VarU32)
    }

    fn var_u64(&mut self, _value: &mut u64) -> CodecResult<()> {
        self.record(FieldCodec::VarU64)
    }

    fn var_i32(&mut self, _value: &mut i32) -> CodecResult<()> {
        self.record(FieldCodec::VarI32)
    }

    fn var_i64(&mut self, _value: &mut i64) -> CodecResult<()> {
        self.record(FieldCodec::VarI64)
    }

    fn fixed_i32(&mut self, _value: &mut i32) -> CodecResult<()> {
        self.record(FieldCodec::Fixed32)
    }

    fn zigzag_f32(&mut self, _value: &mut f32, precision: u8) -> CodecResult<()> {
        self.record(FieldCodec::zigzag(precision))
    }

    fn string(&mut self, _value: &mut String) -> CodecResult<()> {
        self.record(FieldCodec::String)
    }

    fn data_ref(&mut self, _value: &mut DataRef) -> CodecResult<()> {
        self.record(FieldCodec::DataRef)
    }

    fn policy(&mut self, _value: &mut ReplicationPolicy) -> CodecResult<()> {
        self.record(FieldCodec::Policy)
    }

    fn count(&mut self, len: usize) -> CodecResult<usize> {
        self.record(FieldCodec::Count)?;
        Ok(len)
    }

    fn fixed_count(&mut self, len: usize) -> CodecResult<usize> {
        self.record(FieldCodec::Fixed32)?;
        Ok(len)
    }
}

/// Encodes an archive: a collect pass, then a write pass over the same traversal.
///
/// Takes `&mut` because the traversal is shared with decoding; write-mode
/// archivers never modify the value.
pub fn encode_archive<T: ArchiveObject>(
    value: &mut T,
    refs: &dyn DataRefTable,
) -> CodecResult<Vec<u8>> {
    let mut collector = BoolCollector::new();
    value.transfer(&mut collector)?;
    let mut writer = ArchiveWriter::new(collector.finish(), refs);
    value.transfer(&mut writer)?;
    writer.finish()
}

/// Decodes an archive into a fresh value. Trailing bytes are an error.
pub fn decode_archive<T: ArchiveObject + Default>(
    bytes: &[u8],
    refs: &dyn DataRefTable,
    limits: &CodecLimits,
) -> CodecResult<T> {
    if bytes.len() > limits.max_archive_bytes {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::ArchiveBytes,
            limit: limits.max_archive_bytes,
            actual: bytes.len(),
        });
    }
    let mut value = T::default();
    let mut reader = ArchiveReader::new(bytes, refs, limits);
    value.transfer(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Records the slot sequence `value` would be written with.
pub fn archive_layout<T: ArchiveObject>(value: &mut T) -> CodecResult<Vec<FieldCodec>> {
    let mut recorder = LayoutRecorder::new();
    value.transfer(&mut recorder)?;
    Ok(recorder.finish())
}

/// Reads only the leading replication policy of a top-level archive.
pub fn peek_replication_policy(bytes: &[u8]) -> CodecResult<ReplicationPolicy> {
    let mut reader = ByteReader::new(bytes);
    Ok(ReplicationPolicy::from_wire(reader.read_var_u32()?))
}
