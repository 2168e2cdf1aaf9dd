//! Name table codec.
//!
//! ```text
//! i32 count
//! repeated count times:
//!     u32  hash
//!     i32  len
//!     byte[len] text     (UTF-8, no terminator)
//! ```
//!
//! Names are written in ascending hash order.

use std::io::Write;

use crdb_core::{Name, NameTable, hash_name};

use crate::config::Config;
use crate::error::{DecodeError, Error, Result};
use crate::wire::{ByteReader, write_i32, write_u32};

pub(crate) fn write_name_table<W: Write>(
    out: &mut W,
    names: &NameTable,
    config: &Config,
) -> Result<()> {
    let count = i32::try_from(names.len()).map_err(|_| Error::TooManyNames(names.len()))?;
    write_i32(out, count)?;

    for name in names.iter() {
        let text = name.text().as_bytes();
        let too_long = || Error::NameTooLong {
            len: text.len(),
            max: config.max_name_len,
        };
        if text.len() > config.max_name_len {
            return Err(too_long());
        }
        let len = i32::try_from(text.len()).map_err(|_| too_long())?;

        write_u32(out, name.hash())?;
        write_i32(out, len)?;
        out.write_all(text)?;
    }

    tracing::trace!(count, "wrote name table");
    Ok(())
}

pub(crate) fn read_name_table(
    input: &mut ByteReader<'_>,
    config: &Config,
) -> std::result::Result<NameTable, DecodeError> {
    let count = input.count()?;
    let mut names = NameTable::new();

    for _ in 0..count {
        let hash = input.u32()?;
        let len = input.i32()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::InvalidLength(len))?;
        if len > config.max_name_len {
            return Err(DecodeError::NameTooLong {
                len,
                max: config.max_name_len,
            });
        }

        let bytes = input.take(len)?;
        let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidNameText { hash })?;
        if hash_name(text) != hash {
            return Err(DecodeError::NameHashMismatch {
                hash,
                text: text.to_owned(),
            });
        }

        names.insert(Name::from_parts(hash, text));
    }

    tracing::trace!(count, "read name table");
    Ok(names)
}
