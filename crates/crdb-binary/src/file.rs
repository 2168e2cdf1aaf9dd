//! File framing: header, name table, then the entity tables in fixed order.
//!
//! ```text
//! Header       u32 magic, u32 version
//! NameTable    see `names`
//! Namespace    see `table`
//! Type
//! Class
//! Enum
//! EnumConstant
//! Function
//! Field        (named)
//! Field        (unnamed)
//! ```
//!
//! The order is part of the format; readers do not rediscover it from content.
//! Names come first because every entity table resolves name hashes while it
//! is unpacked.

use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crdb_core::{Class, Database, Enum, EnumConstant, Field, Function, Namespace, Stored, Type};
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{DecodeError, Result};
use crate::header::Header;
use crate::meta::{TypeDescriptor, TypeRegistry};
use crate::names::{read_name_table, write_name_table};
use crate::record::Record;
use crate::table::{read_table, write_table};
use crate::wire::ByteReader;

/// The entity tables of a database file, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Namespaces,
    Types,
    Classes,
    Enums,
    EnumConstants,
    Functions,
    Fields,
    UnnamedFields,
}

impl Table {
    /// Every table, in the order they appear in a file.
    pub const ALL: [Table; 8] = [
        Table::Namespaces,
        Table::Types,
        Table::Classes,
        Table::Enums,
        Table::EnumConstants,
        Table::Functions,
        Table::Fields,
        Table::UnnamedFields,
    ];

    /// Whether the table holds the named store of its record kind.
    pub fn named(self) -> bool {
        self != Table::UnnamedFields
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespaces => "namespaces",
            Self::Types => "types",
            Self::Classes => "classes",
            Self::Enums => "enums",
            Self::EnumConstants => "enum_constants",
            Self::Functions => "functions",
            Self::Fields => "fields",
            Self::UnnamedFields => "unnamed_fields",
        }
    }

    /// Layout of this table's records.
    pub fn descriptor(self, registry: &TypeRegistry) -> &TypeDescriptor {
        match self {
            Self::Namespaces => registry.descriptor::<Namespace>(),
            Self::Types => registry.descriptor::<Type>(),
            Self::Classes => registry.descriptor::<Class>(),
            Self::Enums => registry.descriptor::<Enum>(),
            Self::EnumConstants => registry.descriptor::<EnumConstant>(),
            Self::Functions => registry.descriptor::<Function>(),
            Self::Fields | Self::UnnamedFields => registry.descriptor::<Field>(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize `db` into `out`.
pub fn write_database<W: Write>(out: &mut W, db: &Database, config: &Config) -> Result<()> {
    let registry = TypeRegistry::new();

    out.write_all(&Header::default().to_bytes())?;
    write_name_table(out, db.names(), config)?;

    write_table::<Namespace, _>(out, db, &registry, Table::Namespaces)?;
    write_table::<Type, _>(out, db, &registry, Table::Types)?;
    write_table::<Class, _>(out, db, &registry, Table::Classes)?;
    write_table::<Enum, _>(out, db, &registry, Table::Enums)?;
    write_table::<EnumConstant, _>(out, db, &registry, Table::EnumConstants)?;
    write_table::<Function, _>(out, db, &registry, Table::Functions)?;
    write_table::<Field, _>(out, db, &registry, Table::Fields)?;
    write_table::<Field, _>(out, db, &registry, Table::UnnamedFields)?;

    Ok(())
}

/// Serialize `db` into a new buffer.
pub fn encode_database(db: &Database, config: &Config) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_database(&mut out, db, config)?;
    Ok(out)
}

/// Decode a complete database file image into a fresh database.
pub fn decode_database(bytes: &[u8], config: &Config) -> std::result::Result<Database, DecodeError> {
    let registry = TypeRegistry::new();
    let mut input = ByteReader::new(bytes);

    Header::read(&mut input)?.validate()?;

    let mut staged = Database::new();
    *staged.names_mut() = read_name_table(&mut input, config)?;

    stage_table::<Namespace>(&mut input, &mut staged, &registry, Table::Namespaces)?;
    stage_table::<Type>(&mut input, &mut staged, &registry, Table::Types)?;
    stage_table::<Class>(&mut input, &mut staged, &registry, Table::Classes)?;
    stage_table::<Enum>(&mut input, &mut staged, &registry, Table::Enums)?;
    stage_table::<EnumConstant>(&mut input, &mut staged, &registry, Table::EnumConstants)?;
    stage_table::<Function>(&mut input, &mut staged, &registry, Table::Functions)?;
    stage_table::<Field>(&mut input, &mut staged, &registry, Table::Fields)?;
    stage_table::<Field>(&mut input, &mut staged, &registry, Table::UnnamedFields)?;

    Ok(staged)
}

fn stage_table<T: Record + Stored>(
    input: &mut ByteReader<'_>,
    staged: &mut Database,
    registry: &TypeRegistry,
    table: Table,
) -> std::result::Result<(), DecodeError> {
    let records = read_table::<T>(input, staged.names(), registry, table)?;
    for record in records {
        staged.add_primitive(record);
    }
    Ok(())
}

/// Write `db` to a file at `path`, replacing any existing file.
///
/// The database is encoded in full before the file system is touched, then
/// written to a temporary file next to `path` and renamed over it. A failed
/// write leaves any existing file unchanged.
pub fn write_binary_database(path: impl AsRef<Path>, db: &Database) -> Result<()> {
    write_binary_database_with(path, db, &Config::default())
}

pub fn write_binary_database_with(
    path: impl AsRef<Path>,
    db: &Database,
    config: &Config,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_database(db, config)?;

    // The target is only replaced once the whole image is on disk
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote binary database");
    Ok(())
}

/// Read the database file at `path` into `db`.
///
/// Returns `Ok(false)` if the file cannot be opened or does not start with a
/// valid header. Corruption past the header is an error. Either way `db` is
/// only modified when `Ok(true)` is returned.
pub fn read_binary_database(path: impl AsRef<Path>, db: &mut Database) -> Result<bool> {
    read_binary_database_with(path, db, &Config::default())
}

pub fn read_binary_database_with(
    path: impl AsRef<Path>,
    db: &mut Database,
    config: &Config,
) -> Result<bool> {
    let path = path.as_ref();
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "cannot open database file");
            return Ok(false);
        }
    };

    if let Err(reason) = check_header(&bytes) {
        tracing::debug!(path = %path.display(), %reason, "not a binary database");
        return Ok(false);
    }

    let staged = decode_database(&bytes, config)?;
    db.merge(staged);
    tracing::debug!(path = %path.display(), "read binary database");
    Ok(true)
}

/// Check whether `path` starts with a valid database header.
///
/// Reads only the header. Missing, unreadable and too-short files are simply
/// not databases.
pub fn is_binary_database(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "cannot open database file");
            return false;
        }
    };

    let mut bytes = [0u8; Header::SIZE];
    if let Err(error) = file.read_exact(&mut bytes) {
        tracing::debug!(path = %path.display(), %error, "cannot read database header");
        return false;
    }
    check_header(&bytes).is_ok()
}

fn check_header(bytes: &[u8]) -> std::result::Result<(), DecodeError> {
    Header::read(&mut ByteReader::new(bytes))?.validate()
}
