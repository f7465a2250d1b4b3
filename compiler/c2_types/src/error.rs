//! Failures raised by the type core.
//!
//! All of these indicate a bug in the caller (the builder or analyser layer),
//! or a feature that is deliberately not implemented. User-facing type errors
//! are produced upstream from the primitives this crate exposes.

use crate::{TypeId, TypeKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Kind and payload disagree when building a node.
    #[error("invalid construction of {kind} type: {reason}")]
    InvalidConstruction {
        kind: TypeKind,
        reason: &'static str,
    },

    /// A kind-specific operation was called on the wrong kind, or a set-once
    /// field was set again.
    #[error("invalid operation `{op}` on {kind} type: {reason}")]
    InvalidOperation {
        op: &'static str,
        kind: TypeKind,
        reason: &'static str,
    },

    /// The operation has no defined semantics for this kind yet.
    #[error("`{op}` is not supported for {kind} types yet")]
    Unsupported { op: &'static str, kind: TypeKind },

    /// A NULL handle was dereferenced.
    #[error("cannot dereference a NULL type handle")]
    NullType,

    /// The id was not issued by the context it was looked up in.
    #[error("type {0} does not belong to this context")]
    UnknownType(TypeId),
}

impl TypeError {
    /// True for deliberately unimplemented features, as opposed to API misuse.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TypeError::Unsupported { .. })
    }

    /// Kind of the node the failure concerns.
    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            TypeError::InvalidConstruction { kind, .. }
            | TypeError::InvalidOperation { kind, .. }
            | TypeError::Unsupported { kind, .. } => Some(*kind),
            TypeError::NullType | TypeError::UnknownType(_) => None,
        }
    }
}
