use crdb_core::Database;
use indoc::indoc;

use crate::config::Config;
use crate::error::DecodeError;
use crate::file::{Table, encode_database};
use crate::summary::Summary;
use crate::test_utils::sample_database;

#[test]
fn sample_summary() {
    let bytes = encode_database(&sample_database(), &Config::default()).unwrap();
    let summary = Summary::from_bytes(&bytes).unwrap();

    assert_eq!(summary.records(), 9);
    assert_eq!(summary.trailing_bytes, 0);
    insta::assert_snapshot!(summary, @r"
    crdb v1
    names: 8 (19 bytes)
    namespaces: 1 records (8 bytes)
    types: 1 records (12 bytes)
    classes: 2 records (32 bytes)
    enums: 1 records (12 bytes)
    enum_constants: 1 records (16 bytes)
    functions: 1 records (12 bytes)
    fields: 1 records (22 bytes)
    unnamed_fields: 1 records (22 bytes)
    ");
}

#[test]
fn tables_in_file_order() {
    let bytes = encode_database(&Database::new(), &Config::default()).unwrap();
    let summary = Summary::from_bytes(&bytes).unwrap();

    let tables: Vec<_> = summary.tables.iter().map(|t| t.table).collect();
    assert_eq!(tables, Table::ALL);
    assert_eq!(summary.records(), 0);
}

#[test]
fn trailing_bytes_reported() {
    let mut bytes = encode_database(&Database::new(), &Config::default()).unwrap();
    bytes.extend_from_slice(&[0; 3]);

    let summary = Summary::from_bytes(&bytes).unwrap();

    assert_eq!(summary.trailing_bytes, 3);
    assert_eq!(
        summary.to_string(),
        indoc! {"
            crdb v1
            names: 0 (0 bytes)
            namespaces: 0 records (0 bytes)
            types: 0 records (0 bytes)
            classes: 0 records (0 bytes)
            enums: 0 records (0 bytes)
            enum_constants: 0 records (0 bytes)
            functions: 0 records (0 bytes)
            fields: 0 records (0 bytes)
            unnamed_fields: 0 records (0 bytes)
            trailing: 3 bytes
        "}
    );
}

#[test]
fn unresolved_names_still_summarize() {
    let mut bytes = encode_database(&sample_database(), &Config::default()).unwrap();
    // Zero the name count and drop the name entries
    let names_end = 8 + 87;
    bytes.drain(12..names_end);
    bytes[8..12].copy_from_slice(&0i32.to_ne_bytes());

    let summary = Summary::from_bytes(&bytes).unwrap();

    assert_eq!(summary.names, 0);
    assert_eq!(summary.records(), 9);
}

#[test]
fn truncated_table() {
    let mut bytes = encode_database(&sample_database(), &Config::default()).unwrap();
    bytes.truncate(bytes.len() - 1);

    assert_eq!(
        Summary::from_bytes(&bytes),
        Err(DecodeError::Truncated {
            needed: 22,
            available: 21,
        })
    );
}

#[test]
fn bad_magic() {
    let mut bytes = encode_database(&Database::new(), &Config::default()).unwrap();
    bytes[0] ^= 0xff;

    assert!(matches!(
        Summary::from_bytes(&bytes),
        Err(DecodeError::BadMagic(_))
    ));
}
