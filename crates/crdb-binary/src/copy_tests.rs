use crdb_core::{Field, Modifier, Name, NameTable};

use crate::copy::{CopyMode, pack_strided, resolve_name, unpack_strided};
use crate::error::DecodeError;
use crate::meta::TypeRegistry;
use crate::test_utils::Leaf;

fn leaf_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::empty();
    registry.register::<Leaf>();
    registry
}

fn pack_all<T: crate::record::Record>(registry: &TypeRegistry, records: &[T]) -> Vec<u8> {
    let ty = registry.descriptor::<T>();
    let stride = ty.packed_size as usize;
    let refs: Vec<&T> = records.iter().collect();
    let mut packed = vec![0u8; records.len() * stride];
    for field in &ty.fields {
        pack_strided(&refs, field, &mut packed, stride);
    }
    packed
}

fn unpack_all<T: crate::record::Record>(
    registry: &TypeRegistry,
    names: &NameTable,
    packed: &[u8],
    count: usize,
) -> Result<Vec<T>, DecodeError> {
    let ty = registry.descriptor::<T>();
    let stride = ty.packed_size as usize;
    let mut records = vec![T::default(); count];
    for field in &ty.fields {
        unpack_strided(names, packed, stride, field, &mut records)?;
    }
    Ok(records)
}

#[test]
fn copy_mode_dispatch() {
    let registry = TypeRegistry::new();
    let field = registry.descriptor::<Field>();
    let modes: Vec<_> = field.fields.iter().map(CopyMode::of).collect();

    assert_eq!(
        modes,
        [
            CopyMode::NameHash,
            CopyMode::NameHash,
            CopyMode::NameHash,
            CopyMode::Fixed1,
            CopyMode::Fixed1,
            CopyMode::Fixed4,
            CopyMode::Fixed4,
        ]
    );

    let leaf = leaf_registry();
    let modes: Vec<_> = leaf
        .descriptor::<Leaf>()
        .fields
        .iter()
        .map(CopyMode::of)
        .collect();
    assert_eq!(
        modes,
        [
            CopyMode::Fixed4,
            CopyMode::Fixed2,
            CopyMode::NameHash,
            CopyMode::Bytes(3),
        ]
    );
}

#[test]
fn pack_places_fields_at_stride() {
    let registry = leaf_registry();
    let mut names = NameTable::new();
    let a = names.intern("a");
    let records = [
        Leaf::new(0x0102_0304, 0x0506, a.clone(), *b"xyz"),
        Leaf::new(7, 8, Name::default(), [1, 2, 3]),
    ];

    let packed = pack_all(&registry, &records);
    assert_eq!(packed.len(), 26);

    let mut expected = Vec::new();
    expected.extend_from_slice(&0x0102_0304u32.to_ne_bytes());
    expected.extend_from_slice(&0x0506u16.to_ne_bytes());
    expected.extend_from_slice(&a.hash().to_ne_bytes());
    expected.extend_from_slice(b"xyz");
    expected.extend_from_slice(&7u32.to_ne_bytes());
    expected.extend_from_slice(&8u16.to_ne_bytes());
    expected.extend_from_slice(&0u32.to_ne_bytes());
    expected.extend_from_slice(&[1, 2, 3]);
    assert_eq!(packed, expected);
}

#[test]
fn unpack_restores_records() {
    let registry = leaf_registry();
    let mut names = NameTable::new();
    let records = [
        Leaf::new(1, 2, names.intern("first"), *b"abc"),
        Leaf::new(u32::MAX, u16::MAX, names.intern("second"), [0xff; 3]),
        Leaf::new(0, 0, Name::default(), [0; 3]),
    ];

    let packed = pack_all(&registry, &records);
    let decoded: Vec<Leaf> = unpack_all(&registry, &names, &packed, records.len()).unwrap();

    assert_eq!(decoded, records);
}

#[test]
fn unpack_resolves_zero_to_empty_name() {
    let registry = leaf_registry();
    let packed = pack_all(&registry, &[Leaf::new(1, 1, Name::default(), [0; 3])]);

    let decoded: Vec<Leaf> = unpack_all(&registry, &NameTable::new(), &packed, 1).unwrap();

    assert!(decoded[0].label.is_empty());
    assert_eq!(decoded[0].label, Name::default());
}

#[test]
fn unpack_rejects_unknown_hash() {
    let registry = leaf_registry();
    let label = Name::new("missing");
    let packed = pack_all(&registry, &[Leaf::new(1, 1, label.clone(), [0; 3])]);

    let err = unpack_all::<Leaf>(&registry, &NameTable::new(), &packed, 1).unwrap_err();

    assert_eq!(
        err,
        DecodeError::UnresolvedName {
            hash: label.hash(),
            record: "Leaf",
        }
    );
}

#[test]
fn field_flags_round_trip() {
    let registry = TypeRegistry::new();
    let mut names = NameTable::new();
    let records = [
        Field::new(names.intern("p"), names.intern("f"), names.intern("int"))
            .with_modifier(Modifier::Reference, true)
            .with_index(2)
            .with_parent_unique_id(9),
        Field::new(Name::default(), names.intern("f"), names.intern("int")).with_index(-1),
    ];

    let packed = pack_all(&registry, &records);
    assert_eq!(packed.len(), 44);
    assert_eq!(packed[12], Modifier::Reference as u8);
    assert_eq!(packed[13], 1);
    assert_eq!(packed[22 + 14..22 + 18], (-1i32).to_ne_bytes());

    let decoded: Vec<Field> = unpack_all(&registry, &names, &packed, 2).unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn unpack_rejects_bad_modifier() {
    let registry = TypeRegistry::new();
    let mut packed = pack_all(&registry, &[Field::default()]);
    packed[12] = 3;

    let err = unpack_all::<Field>(&registry, &NameTable::new(), &packed, 1).unwrap_err();

    assert_eq!(
        err,
        DecodeError::InvalidFieldValue {
            record: "Field",
            field: "modifier",
            value: 3,
        }
    );
}

#[test]
fn unpack_rejects_bad_bool() {
    let registry = TypeRegistry::new();
    let mut packed = pack_all(&registry, &[Field::default()]);
    packed[13] = 2;

    let err = unpack_all::<Field>(&registry, &NameTable::new(), &packed, 1).unwrap_err();

    assert_eq!(
        err,
        DecodeError::InvalidFieldValue {
            record: "Field",
            field: "is_const",
            value: 2,
        }
    );
}

#[test]
fn empty_slices_are_untouched() {
    let registry = leaf_registry();
    let ty = registry.descriptor::<Leaf>();
    let mut packed: Vec<u8> = Vec::new();

    for field in &ty.fields {
        pack_strided::<Leaf>(&[], field, &mut packed, 13);
        unpack_strided::<Leaf>(&NameTable::new(), &packed, 13, field, &mut []).unwrap();
    }
    assert!(packed.is_empty());
}

#[test]
fn resolve_name_lookup() {
    let mut names = NameTable::new();
    let a = names.intern("a");

    assert_eq!(resolve_name(&names, 0, "T"), Ok(Name::default()));
    assert_eq!(resolve_name(&names, a.hash(), "T"), Ok(a));
    assert_eq!(
        resolve_name(&names, 42, "T"),
        Err(DecodeError::UnresolvedName {
            hash: 42,
            record: "T",
        })
    );
}
