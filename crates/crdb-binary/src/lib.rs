#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Packed binary file format for crdb reflection databases.
//!
//! This crate contains:
//! - File framing ([`write_binary_database`], [`read_binary_database`],
//!   [`is_binary_database`]) and the in-memory forms they build on
//! - The type descriptor registry that flattens record inheritance chains
//!   into padding-free packed layouts ([`TypeRegistry`], [`TypeDescriptor`])
//! - Typed field access for packable records ([`Record`])
//! - A file [`Summary`] for inspection

mod config;
mod copy;
mod error;
mod file;
mod header;
mod invariants;
mod meta;
mod names;
mod record;
mod summary;
mod table;
mod wire;

#[cfg(test)]
mod copy_tests;
#[cfg(test)]
mod summary_tests;
#[cfg(test)]
mod test_utils;

/// Magic value: the ASCII bytes `crdb` read as a little-endian u32.
pub const MAGIC: u32 = u32::from_le_bytes(*b"crdb");

/// Current format version.
pub const VERSION: u32 = 1;

pub use config::{Config, DEFAULT_MAX_NAME_LEN};
pub use error::{DecodeError, Error, Result};
pub use file::{
    Table, decode_database, encode_database, is_binary_database, read_binary_database,
    read_binary_database_with, write_binary_database, write_binary_database_with,
    write_database,
};
pub use header::Header;
pub use meta::{
    FieldDecl, FieldDescriptor, FieldKind, LevelDecl, NAME_REF_SIZE, TypeDescriptor, TypeRegistry,
};
pub use record::{FieldRef, FieldValue, Record};
pub use summary::{Summary, TableSummary};
