//! Entity records: the program entities a reflection database describes.
//!
//! Records mirror an inheritance chain. A derived record embeds its base as
//! the first member and is `#[repr(C)]`, so the base sits at offset 0 and field
//! offsets measured on the base stay valid on every derived record.
//!
//! ```text
//! Primitive ─┬─ Namespace
//!            ├─ Type ─┬─ Class
//!            │        └─ Enum
//!            ├─ EnumConstant
//!            ├─ Function
//!            └─ Field
//! ```

use crate::name::{Name, NameHash};

/// Record kind tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Namespace,
    Type,
    Class,
    Enum,
    EnumConstant,
    Function,
    Field,
}

impl PrimitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "Namespace",
            Self::Type => "Type",
            Self::Class => "Class",
            Self::Enum => "Enum",
            Self::EnumConstant => "EnumConstant",
            Self::Function => "Function",
            Self::Field => "Field",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Primitive {
    pub name: Name,
    /// Enclosing scope; empty at the top level.
    pub parent: Name,
}

impl Primitive {
    pub fn new(name: Name, parent: Name) -> Self {
        Self { name, parent }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Namespace {
    pub primitive: Primitive,
}

impl Namespace {
    pub fn new(name: Name, parent: Name) -> Self {
        Self {
            primitive: Primitive::new(name, parent),
        }
    }
}

/// A named type with a known size (builtins, typedef targets).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Type {
    pub primitive: Primitive,
    /// Size in bytes.
    pub size: u32,
}

impl Type {
    pub fn new(name: Name, parent: Name, size: u32) -> Self {
        Self {
            primitive: Primitive::new(name, parent),
            size,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Class {
    pub ty: Type,
    /// Single base class; empty if none.
    pub base_class: Name,
}

impl Class {
    pub fn new(name: Name, parent: Name, base_class: Name, size: u32) -> Self {
        Self {
            ty: Type::new(name, parent, size),
            base_class,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Enum {
    pub ty: Type,
}

impl Enum {
    pub fn new(name: Name, parent: Name, size: u32) -> Self {
        Self {
            ty: Type::new(name, parent, size),
        }
    }
}

/// Enumerator; `parent` is its enum.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct EnumConstant {
    pub primitive: Primitive,
    pub value: i64,
}

impl EnumConstant {
    pub fn new(name: Name, parent: Name, value: i64) -> Self {
        Self {
            primitive: Primitive::new(name, parent),
            value,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Function {
    pub primitive: Primitive,
    /// Distinguishes overloads sharing a name.
    pub unique_id: u32,
}

impl Function {
    pub fn new(name: Name, parent: Name, unique_id: u32) -> Self {
        Self {
            primitive: Primitive::new(name, parent),
            unique_id,
        }
    }
}

/// How a field refers to its type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Modifier {
    #[default]
    Value = 0,
    Pointer = 1,
    Reference = 2,
}

impl Modifier {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Value),
            1 => Some(Self::Pointer),
            2 => Some(Self::Reference),
            _ => None,
        }
    }
}

/// Data member, function parameter or return slot.
///
/// A field with an empty name is unnamed (return values, anonymous
/// parameters) and lives in the database's unnamed field store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Field {
    pub primitive: Primitive,
    pub type_name: Name,
    pub modifier: Modifier,
    pub is_const: bool,
    /// Declaration order within the parent; -1 for a return slot.
    pub index: i32,
    /// `unique_id` of the owning function overload, 0 for data members.
    pub parent_unique_id: u32,
}

impl Field {
    pub fn new(name: Name, parent: Name, type_name: Name) -> Self {
        Self {
            primitive: Primitive::new(name, parent),
            type_name,
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier, is_const: bool) -> Self {
        self.modifier = modifier;
        self.is_const = is_const;
        self
    }

    pub fn with_index(mut self, index: i32) -> Self {
        self.index = index;
        self
    }

    pub fn with_parent_unique_id(mut self, id: u32) -> Self {
        self.parent_unique_id = id;
        self
    }
}

/// Common access to every record kind.
pub trait Entity: Clone {
    const KIND: PrimitiveKind;

    fn primitive(&self) -> &Primitive;

    #[inline]
    fn name(&self) -> &Name {
        &self.primitive().name
    }

    #[inline]
    fn parent(&self) -> &Name {
        &self.primitive().parent
    }

    /// Store key, derived from the record itself.
    #[inline]
    fn key(&self) -> NameHash {
        self.primitive().name.hash()
    }

    /// Whether the record belongs in the named store of its kind.
    #[inline]
    fn is_named(&self) -> bool {
        true
    }
}

macro_rules! impl_entity {
    ($ty:ty, $kind:ident, $($path:ident).+) => {
        impl Entity for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            #[inline]
            fn primitive(&self) -> &Primitive {
                &self.$($path).+
            }
        }
    };
}

impl_entity!(Namespace, Namespace, primitive);
impl_entity!(Type, Type, primitive);
impl_entity!(Class, Class, ty.primitive);
impl_entity!(Enum, Enum, ty.primitive);
impl_entity!(EnumConstant, EnumConstant, primitive);
impl_entity!(Function, Function, primitive);

impl Entity for Field {
    const KIND: PrimitiveKind = PrimitiveKind::Field;

    #[inline]
    fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    #[inline]
    fn is_named(&self) -> bool {
        !self.primitive.name.is_empty()
    }
}
