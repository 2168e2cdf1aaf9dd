//! Strided field copier.
//!
//! Copies one field across a whole table at a time. The packed side is a flat
//! byte block where record `i`'s copy of a field sits at
//! `packed_offset + i * stride`; the native side is a slice of records reached
//! through their field accessors. The copy strategy is picked once per field
//! from its kind and width, then applied to every record.

use crdb_core::{Name, NameHash, NameTable};

use crate::error::DecodeError;
use crate::invariants;
use crate::meta::{FieldDescriptor, FieldKind};
use crate::record::{FieldRef, FieldValue, Record};

const _: () = assert!(size_of::<u8>() == 1);
const _: () = assert!(size_of::<u16>() == 2);
const _: () = assert!(size_of::<u32>() == 4);
const _: () = assert!(size_of::<u64>() == 8);

/// Copy strategy for one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CopyMode {
    Fixed1,
    Fixed2,
    Fixed4,
    Fixed8,
    /// Raw byte range of any other width.
    Bytes(usize),
    /// Name in memory, hash on disk.
    NameHash,
}

impl CopyMode {
    pub(crate) fn of(field: &FieldDescriptor) -> Self {
        match (field.kind, field.size) {
            (FieldKind::Basic, 1) => Self::Fixed1,
            (FieldKind::Basic, 2) => Self::Fixed2,
            (FieldKind::Basic, 4) => Self::Fixed4,
            (FieldKind::Basic, 8) => Self::Fixed8,
            (FieldKind::Basic, size) => Self::Bytes(size as usize),
            (FieldKind::NameRef, _) => Self::NameHash,
        }
    }
}

#[inline]
fn fixed<const N: usize>(slot: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(slot);
    bytes
}

/// Resolve a hash read from disk. Hash 0 is the empty name.
pub(crate) fn resolve_name(
    names: &NameTable,
    hash: NameHash,
    record: &'static str,
) -> Result<Name, DecodeError> {
    if hash == 0 {
        return Ok(Name::default());
    }
    names
        .get(hash)
        .cloned()
        .ok_or(DecodeError::UnresolvedName { hash, record })
}

macro_rules! pack_fixed {
    ($slots:expr, $records:expr, $field:expr, $variant:ident) => {
        for (slot, record) in $slots.zip($records) {
            match record.field($field.index) {
                FieldRef::$variant(v) => slot.copy_from_slice(&v.to_ne_bytes()),
                other => invariants::accessor_mismatch(record_name::<T>(), $field, other.shape()),
            }
        }
    };
}

macro_rules! unpack_fixed {
    ($slots:expr, $records:expr, $field:expr, $variant:ident, $ty:ty) => {
        for (slot, record) in $slots.zip($records) {
            let value = <$ty>::from_ne_bytes(fixed(slot));
            record.set_field($field.index, FieldValue::$variant(value))?;
        }
    };
}

#[inline]
fn record_name<T: Record>() -> &'static str {
    T::level().name
}

/// Pack one field of every record into the packed table `dst`.
///
/// `dst` must hold `records.len() * dst_stride` bytes.
pub(crate) fn pack_strided<T: Record>(
    records: &[&T],
    field: &FieldDescriptor,
    dst: &mut [u8],
    dst_stride: usize,
) {
    if records.is_empty() {
        return;
    }
    let size = field.size as usize;
    let slots = dst[field.packed_offset as usize..]
        .chunks_mut(dst_stride)
        .map(|slot| &mut slot[..size]);
    let records = records.iter();

    match CopyMode::of(field) {
        CopyMode::Fixed1 => pack_fixed!(slots, records, field, U8),
        CopyMode::Fixed2 => pack_fixed!(slots, records, field, U16),
        CopyMode::Fixed4 => pack_fixed!(slots, records, field, U32),
        CopyMode::Fixed8 => pack_fixed!(slots, records, field, U64),
        CopyMode::Bytes(len) => {
            for (slot, record) in slots.zip(records) {
                match record.field(field.index) {
                    FieldRef::Bytes(bytes) if bytes.len() == len => slot.copy_from_slice(bytes),
                    other => invariants::accessor_mismatch(record_name::<T>(), field, other.shape()),
                }
            }
        }
        CopyMode::NameHash => {
            for (slot, record) in slots.zip(records) {
                match record.field(field.index) {
                    FieldRef::Name(name) => slot.copy_from_slice(&name.hash().to_ne_bytes()),
                    other => invariants::accessor_mismatch(record_name::<T>(), field, other.shape()),
                }
            }
        }
    }
}

/// Unpack one field of every record from the packed table `src`.
///
/// `src` must hold `records.len() * src_stride` bytes. Name references are
/// resolved through `names`, which must already hold every hash the table
/// uses.
pub(crate) fn unpack_strided<T: Record>(
    names: &NameTable,
    src: &[u8],
    src_stride: usize,
    field: &FieldDescriptor,
    records: &mut [T],
) -> Result<(), DecodeError> {
    if records.is_empty() {
        return Ok(());
    }
    let size = field.size as usize;
    let slots = src[field.packed_offset as usize..]
        .chunks(src_stride)
        .map(|slot| &slot[..size]);
    let records = records.iter_mut();

    match CopyMode::of(field) {
        CopyMode::Fixed1 => unpack_fixed!(slots, records, field, U8, u8),
        CopyMode::Fixed2 => unpack_fixed!(slots, records, field, U16, u16),
        CopyMode::Fixed4 => unpack_fixed!(slots, records, field, U32, u32),
        CopyMode::Fixed8 => unpack_fixed!(slots, records, field, U64, u64),
        CopyMode::Bytes(_) => {
            for (slot, record) in slots.zip(records) {
                record.set_field(field.index, FieldValue::Bytes(slot))?;
            }
        }
        CopyMode::NameHash => {
            for (slot, record) in slots.zip(records) {
                let hash = u32::from_ne_bytes(fixed(slot));
                let name = resolve_name(names, hash, record_name::<T>())?;
                record.set_field(field.index, FieldValue::Name(name))?;
            }
        }
    }
    Ok(())
}
