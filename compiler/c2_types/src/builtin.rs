//! Builtin type registry.
//!
//! The fourteen primitive types are singletons shared by every
//! [`TypeContext`](crate::TypeContext). They are built once on first access,
//! never mutated afterwards, and never owned or dropped by a context.

use std::sync::OnceLock;

use crate::{Type, TypeId};

/// Primitive type identifier. Discriminants equal the builtin's [`TypeId`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BuiltinKind {
    U8 = 0,
    U16 = 1,
    U32 = 2,
    U64 = 3,
    I8 = 4,
    I16 = 5,
    I32 = 6,
    I64 = 7,
    Int = 8,
    String = 9,
    F32 = 10,
    F64 = 11,
    Bool = 12,
    Void = 13,
}

impl BuiltinKind {
    /// Every builtin, in `TypeId` order.
    pub const ALL: [Self; TypeId::BUILTIN_COUNT as usize] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::Int,
        Self::String,
        Self::F32,
        Self::F64,
        Self::Bool,
        Self::Void,
    ];

    #[inline]
    pub const fn type_id(self) -> TypeId {
        TypeId::from_raw(self as u32)
    }

    pub const fn from_type_id(id: TypeId) -> Option<Self> {
        if id.raw() < TypeId::BUILTIN_COUNT {
            Some(Self::ALL[id.raw() as usize])
        } else {
            None
        }
    }

    /// Source-level name, as written in C2 code.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Int => "int",
            Self::String => "string",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Void => "void",
        }
    }

    /// Name of the matching C type in generated code.
    pub const fn c_name(self) -> &'static str {
        match self {
            Self::U8 => "unsigned char",
            Self::U16 => "unsigned short",
            Self::U32 => "unsigned",
            Self::U64 => "unsigned long long",
            Self::I8 => "char",
            Self::I16 => "short",
            Self::I32 | Self::Int | Self::Bool => "int",
            Self::I64 => "long long",
            Self::String => "const char*",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::Void => "void",
        }
    }

    /// Width in bytes. `string` is pointer-sized on the 32-bit target model.
    pub const fn width(self) -> u32 {
        match self {
            Self::Void => 0,
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::Int | Self::String | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Int
        )
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Int | Self::F32 | Self::F64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

type Registry = [Type<'static>; TypeId::BUILTIN_COUNT as usize];

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| BuiltinKind::ALL.map(Type::from_builtin))
}

/// The shared node for a builtin.
pub fn builtin_type(kind: BuiltinKind) -> &'static Type<'static> {
    &registry()[kind as usize]
}
