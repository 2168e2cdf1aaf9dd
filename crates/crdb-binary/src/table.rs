//! Table codec: one record kind, packed as a single block.
//!
//! ```text
//! i32 count
//! byte[count * packed_size] records    (only if count > 0)
//! ```
//!
//! Within the block every record occupies `packed_size` bytes at
//! `i * packed_size`, fields at their packed offsets. The block is filled one
//! field at a time across all records.

use std::io::Write;

use crdb_core::{Database, NameTable, Stored};

use crate::copy::{pack_strided, unpack_strided};
use crate::error::{DecodeError, Error, Result};
use crate::file::Table;
use crate::meta::{FieldKind, TypeDescriptor, TypeRegistry};
use crate::record::{FieldRef, Record};
use crate::wire::{ByteReader, write_i32};

/// Write the store `table` selects from `db`.
pub(crate) fn write_table<T, W>(
    out: &mut W,
    db: &Database,
    registry: &TypeRegistry,
    table: Table,
) -> Result<()>
where
    T: Record + Stored,
    W: Write,
{
    // Contiguous snapshot in store order
    let records: Vec<&T> = db.primitive_store::<T>(table.named()).iter().collect();

    let too_large = || Error::TableTooLarge {
        table,
        count: records.len(),
    };
    let count = i32::try_from(records.len()).map_err(|_| too_large())?;
    write_i32(out, count)?;

    if records.is_empty() {
        tracing::debug!(%table, "wrote empty table");
        return Ok(());
    }

    let ty = registry.descriptor::<T>();
    let stride = ty.packed_size as usize;
    let len = ty.packed_len(records.len()).ok_or_else(too_large)?;
    check_names(&records, db.names(), ty, table)?;

    let mut packed = vec![0u8; len];
    for field in &ty.fields {
        pack_strided(&records, field, &mut packed, stride);
    }
    out.write_all(&packed)?;

    tracing::debug!(%table, count, bytes = len, "wrote table");
    Ok(())
}

/// Every name a record references must be in the table written ahead of it,
/// or the file could never be read back.
fn check_names<T: Record>(
    records: &[&T],
    names: &NameTable,
    ty: &TypeDescriptor,
    table: Table,
) -> Result<()> {
    for field in ty.fields.iter().filter(|f| f.kind == FieldKind::NameRef) {
        for record in records {
            let FieldRef::Name(name) = record.field(field.index) else {
                continue;
            };
            if !name.is_empty() && !names.contains(name.hash()) {
                return Err(Error::UnresolvedName {
                    table,
                    field: field.name,
                    hash: name.hash(),
                });
            }
        }
    }
    Ok(())
}

/// Read one table's records.
///
/// Every name reference must resolve through `names`. Nothing is inserted
/// anywhere; the caller decides when the records are committed.
pub(crate) fn read_table<T: Record>(
    input: &mut ByteReader<'_>,
    names: &NameTable,
    registry: &TypeRegistry,
    table: Table,
) -> std::result::Result<Vec<T>, DecodeError> {
    let count = input.count()?;
    if count == 0 {
        tracing::debug!(%table, "read empty table");
        return Ok(Vec::new());
    }

    let ty = registry.descriptor::<T>();
    let stride = ty.packed_size as usize;
    let len = ty
        .packed_len(count)
        .ok_or(DecodeError::InvalidCount(count as i32))?;
    let packed = input.take(len)?;

    let mut records = vec![T::default(); count];
    for field in &ty.fields {
        unpack_strided(names, packed, stride, field, &mut records)?;
    }

    tracing::debug!(%table, count, bytes = len, "read table");
    Ok(records)
}
