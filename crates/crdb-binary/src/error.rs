//! Error types.

use std::io;

use crdb_core::NameHash;

use crate::file::Table;
use crate::{MAGIC, VERSION};

/// The bytes do not form a valid database file.
///
/// Any of these aborts the whole read; nothing decoded so far reaches the
/// destination database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid magic: {0:#010x} (expected {MAGIC:#010x})")]
    BadMagic(u32),
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("truncated data: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("invalid record count: {0}")]
    InvalidCount(i32),
    #[error("invalid string length: {0}")]
    InvalidLength(i32),
    #[error("name of {len} bytes exceeds the {max} byte limit")]
    NameTooLong { len: usize, max: usize },
    #[error("name {hash:#010x} is not valid UTF-8")]
    InvalidNameText { hash: NameHash },
    #[error("name {text:?} stored under hash {hash:#010x}, which is not its hash")]
    NameHashMismatch { hash: NameHash, text: String },
    #[error("{record} references unknown name {hash:#010x}")]
    UnresolvedName { hash: NameHash, record: &'static str },
    #[error("{record}.{field} holds invalid value {value}")]
    InvalidFieldValue {
        record: &'static str,
        field: &'static str,
        value: u64,
    },
}

impl DecodeError {
    /// Whether the error concerns the file header rather than its contents.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::BadMagic(_) | Self::UnsupportedVersion(_))
    }
}

/// Reading or writing a database failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("{table} table holds {count} records, more than the format can count")]
    TableTooLarge { table: Table, count: usize },
    #[error("{table} record field {field} references {hash:#010x}, which is not in the name table")]
    UnresolvedName {
        table: Table,
        field: &'static str,
        hash: NameHash,
    },
    #[error("{0} names, more than the format can count")]
    TooManyNames(usize),
    #[error("name of {len} bytes exceeds the {max} byte limit")]
    NameTooLong { len: usize, max: usize },
}

/// Result type for database serialization.
pub type Result<T> = std::result::Result<T, Error>;
