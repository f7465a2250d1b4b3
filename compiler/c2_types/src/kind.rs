//! Type kind discriminant.

use std::fmt;

/// The eight kinds of type node.
///
/// A node's kind is fixed for its lifetime.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TypeKind {
    /// Primitive from the builtin registry.
    Builtin = 0,
    /// Named alias; its target is attached once resolved.
    User = 1,
    Struct = 2,
    Union = 3,
    Enum = 4,
    /// Function signature; `ref_type` holds the return type.
    Func = 5,
    /// `ref_type` holds the pointee.
    Pointer = 6,
    /// `ref_type` holds the element type.
    Array = 7,
}

impl TypeKind {
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::Builtin => "builtin",
            TypeKind::User => "user",
            TypeKind::Struct => "struct",
            TypeKind::Union => "union",
            TypeKind::Enum => "enum",
            TypeKind::Func => "func",
            TypeKind::Pointer => "pointer",
            TypeKind::Array => "array",
        }
    }

    /// Kinds whose `ref_type` must be present at construction.
    #[inline]
    pub const fn requires_ref_type(self) -> bool {
        matches!(self, TypeKind::Pointer | TypeKind::Array)
    }

    /// Kinds that own a member list.
    #[inline]
    pub const fn has_members(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Union | TypeKind::Enum)
    }

    /// Kinds that are their own canonical type from creation.
    #[inline]
    pub(crate) const fn is_self_canonical(self) -> bool {
        matches!(
            self,
            TypeKind::Builtin | TypeKind::Struct | TypeKind::Union | TypeKind::Enum | TypeKind::Func
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
