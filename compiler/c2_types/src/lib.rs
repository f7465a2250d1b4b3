//! Type representation and interning for the C2 front end.
//!
//! # Model
//!
//! - [`Type`]: one node per distinct type, a tagged variant over [`TypeKind`].
//! - [`QualType`]: a non-owning handle (`TypeId` + [`Qualifiers`]). This is what
//!   declarations and expressions carry around.
//! - [`TypeContext`]: the arena that owns every non-builtin node of one
//!   compilation unit and deduplicates pointer types.
//! - Builtins ([`BuiltinKind`]) live in a process-wide registry at fixed
//!   [`TypeId`] indices and are never owned by a context.
//!
//! # Rendering
//!
//! Four contracts, all writing into a [`c2_ir::StringBuilder`]:
//! name form, full form, effective form and the [`Recursion`]-controlled dump.
//! `Struct`/`Union` expansion in the full form stops at a struct that is
//! already being expanded, so self-referential types print finitely.
//!
//! # Lifetimes
//!
//! `'ast` is the lifetime of expression nodes owned by declarations elsewhere
//! (borrowed array sizes and alias names). Owned sub-structures (members,
//! argument lists, owned array sizes) are dropped with their node.

mod builtin;
mod context;
mod error;
mod format;
mod idx;
mod kind;
mod member;
mod qual_type;
mod qualifiers;
mod query;
mod ty;

pub use builtin::{builtin_type, BuiltinKind};
pub use context::TypeContext;
pub use error::TypeError;
pub use format::Recursion;
pub use idx::TypeId;
pub use kind::TypeKind;
pub use member::{FieldDecl, MemberDecl};
pub use qual_type::QualType;
pub use qualifiers::Qualifiers;
pub use query::{ENUM_WIDTH, POINTER_WIDTH};
pub use ty::{ArraySize, Composite, Members, Type, TypeData};

// Handle size regressions would ripple through every declaration node.
const _: () = assert!(std::mem::size_of::<QualType>() == 8);
