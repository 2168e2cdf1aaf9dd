#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the crdb reflection database.
//!
//! - [`Name`] / [`NameTable`]: interned identifiers, referenced by hash
//! - Entity records ([`Namespace`], [`Type`], [`Class`], [`Enum`],
//!   [`EnumConstant`], [`Function`], [`Field`]) sharing a [`Primitive`] base
//! - [`PrimitiveStore`]: per-kind container keyed by name hash
//! - [`Database`]: owns the names and every store

mod database;
mod name;
mod primitives;
mod store;

#[cfg(test)]
mod name_tests;

pub use database::{Database, Stored};
pub use name::{Name, NameHash, NameTable, hash_name};
pub use primitives::{
    Class, Entity, Enum, EnumConstant, Field, Function, Modifier, Namespace, Primitive,
    PrimitiveKind, Type,
};
pub use store::PrimitiveStore;
