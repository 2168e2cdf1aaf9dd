use crate::{Name, NameTable, hash_name};

#[test]
fn empty_text_hashes_to_zero() {
    assert_eq!(hash_name(""), 0);
    assert!(Name::new("").is_empty());
    assert_eq!(Name::new(""), Name::default());
}

#[test]
fn hash_is_deterministic() {
    assert_eq!(hash_name("crdb::Database"), hash_name("crdb::Database"));
    assert_ne!(hash_name("Foo"), hash_name("Bar"));
    // CRC-32/IEEE check value
    assert_eq!(hash_name("123456789"), 0xCBF4_3926);
}

#[test]
fn intern_deduplicates() {
    let mut names = NameTable::new();

    let a = names.intern("foo");
    let b = names.intern("foo");
    let c = names.intern("bar");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(names.len(), 2);
}

#[test]
fn intern_empty_is_not_stored() {
    let mut names = NameTable::new();

    let empty = names.intern("");

    assert!(empty.is_empty());
    assert!(names.is_empty());
}

#[test]
fn resolve_roundtrip() {
    let mut names = NameTable::new();

    let name = names.intern("hello");
    assert_eq!(names.resolve(name.hash()), Some("hello"));
    assert_eq!(names.get(name.hash()), Some(&name));
    assert_eq!(names.resolve(name.hash() ^ 1), None);
}

#[test]
fn iter_is_hash_ordered() {
    let mut names = NameTable::new();
    names.intern("zeta");
    names.intern("alpha");
    names.intern("mid");

    let hashes: Vec<_> = names.iter().map(Name::hash).collect();
    let mut sorted = hashes.clone();
    sorted.sort_unstable();
    assert_eq!(hashes, sorted);
}

#[test]
fn insert_replaces_same_hash() {
    let mut names = NameTable::new();
    let original = names.intern("x");

    let previous = names.insert(Name::from_parts(original.hash(), "x"));

    assert_eq!(previous, Some(original));
    assert_eq!(names.len(), 1);
}

#[test]
fn clones_share_text() {
    let mut names = NameTable::new();
    let a = names.intern("shared");
    let b = names.intern("shared");

    assert!(std::ptr::eq(a.text(), b.text()));
}

#[test]
fn debug_shows_hash_and_text() {
    let name = Name::from_parts(0x1234, "N");
    assert_eq!(format!("{name:?}"), r#"Name(0x00001234 "N")"#);
    assert_eq!(name.to_string(), "N");
}

#[test]
fn zero_hash_text_is_the_empty_name() {
    let mut names = NameTable::new();
    assert_eq!(hash_name("field_558_McOV"), 0);

    let name = names.intern("field_558_McOV");

    assert!(name.is_empty());
    assert_eq!(name, Name::default());
    assert!(names.is_empty());
}
