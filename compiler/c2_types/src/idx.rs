//! Type index handle.
//!
//! Every type node is addressed by a 32-bit `TypeId`:
//!
//! - Builtins occupy the fixed range `0..BUILTIN_COUNT` and resolve through the
//!   process-wide registry.
//! - Indices `FIRST_DYNAMIC..` address nodes owned by a single
//!   [`TypeContext`](crate::TypeContext), in creation order.
//! - [`TypeId::NONE`] is the null sentinel.
//!
//! Type identity is index equality. A `TypeId` is only meaningful for the
//! context that produced it.

use std::fmt;

use crate::BuiltinKind;

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Builtins (indices 0-13), same order as `BuiltinKind` ===

    pub const U8: Self = Self(0);
    pub const U16: Self = Self(1);
    pub const U32: Self = Self(2);
    pub const U64: Self = Self(3);
    pub const I8: Self = Self(4);
    pub const I16: Self = Self(5);
    pub const I32: Self = Self(6);
    pub const I64: Self = Self(7);
    pub const INT: Self = Self(8);
    pub const STRING: Self = Self(9);
    pub const F32: Self = Self(10);
    pub const F64: Self = Self(11);
    pub const BOOL: Self = Self(12);
    pub const VOID: Self = Self(13);

    /// Number of builtin types.
    pub const BUILTIN_COUNT: u32 = 14;

    // Indices 14-63 are reserved for future builtins.

    /// First index handed out by a `TypeContext`.
    pub const FIRST_DYNAMIC: u32 = 64;

    /// Sentinel for "no type".
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// The builtin this index names, if any.
    #[inline]
    pub const fn builtin_kind(self) -> Option<BuiltinKind> {
        BuiltinKind::from_type_id(self)
    }

    /// Position of a context-owned node in its context's storage.
    #[inline]
    pub(crate) fn dynamic_index(self) -> Option<usize> {
        if self.is_none() || self.0 < Self::FIRST_DYNAMIC {
            return None;
        }
        Some((self.0 - Self::FIRST_DYNAMIC) as usize)
    }

    /// Inverse of [`TypeId::dynamic_index`].
    ///
    /// # Panics
    /// Panics if `index` does not fit below the `NONE` sentinel.
    pub(crate) fn from_dynamic_index(index: usize) -> Self {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(Self::FIRST_DYNAMIC))
            .filter(|&raw| raw != u32::MAX)
            .map(Self)
            .unwrap_or_else(|| panic!("type context exceeded {} nodes", u32::MAX))
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_kind() {
            Some(kind) => write!(f, "TypeId::{}", kind.name().to_uppercase()),
            None if self.is_none() => write!(f, "TypeId::NONE"),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_kind() {
            Some(kind) => f.write_str(kind.name()),
            None if self.is_none() => f.write_str("<none>"),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
