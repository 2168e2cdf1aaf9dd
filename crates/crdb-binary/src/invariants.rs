//! Invariant checks excluded from coverage reports.
//!
//! Each of these is a disagreement between a record's declared level chain
//! and its accessors, never a property of the input file.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::meta::FieldDescriptor;

#[cold]
pub(crate) fn unregistered_type(name: &str) -> ! {
    panic!("TypeRegistry: record type {name} was never registered")
}

#[cold]
pub(crate) fn no_such_field(record: &str, index: usize) -> ! {
    panic!("{record}: no field at flattened index {index}")
}

#[cold]
pub(crate) fn shape_mismatch(record: &str, index: usize, got: &str) -> ! {
    panic!("{record}: field {index} cannot hold a {got} value")
}

#[cold]
pub(crate) fn accessor_mismatch(record: &str, field: &FieldDescriptor, got: &str) -> ! {
    panic!(
        "{record}.{}: declared as {field} ({} bytes) but accessor yields {got}",
        field.name, field.size
    )
}
