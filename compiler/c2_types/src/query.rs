//! Structural queries over the type graph: width, compatibility and alias
//! lookup.
//!
//! All walks follow `ref_type` links through the context and are wrapped in
//! [`ensure_sufficient_stack`], since pointer and array chains have no depth
//! bound.

use c2_ir::Expr;
use c2_stack::ensure_sufficient_stack;

use crate::{TypeContext, TypeError, TypeId, TypeKind};

/// Width of function and data pointers. The model targets 32-bit.
pub const POINTER_WIDTH: u32 = 4;

/// Placeholder width for every enum until enum storage is laid out.
pub const ENUM_WIDTH: u32 = 4;

impl<'ast> TypeContext<'ast> {
    /// Byte width of `id`.
    ///
    /// Arrays report their *element* width, not element width times length.
    /// Struct and union widths are not computed yet.
    pub fn width(&self, id: TypeId) -> Result<u32, TypeError> {
        let ty = self.try_get(id)?;
        match ty.kind() {
            TypeKind::Builtin => Ok(ty.builtin().map_or(0, |kind| kind.width())),
            TypeKind::User => {
                let target = ty.ref_type();
                if target.is_null() {
                    return Err(TypeError::InvalidOperation {
                        op: "width",
                        kind: TypeKind::User,
                        reason: "the user type is not resolved yet",
                    });
                }
                ensure_sufficient_stack(|| self.width(target.type_id()))
            }
            TypeKind::Struct | TypeKind::Union => Err(TypeError::Unsupported {
                op: "width",
                kind: ty.kind(),
            }),
            TypeKind::Enum => Ok(ENUM_WIDTH),
            TypeKind::Func | TypeKind::Pointer => Ok(POINTER_WIDTH),
            TypeKind::Array => ensure_sufficient_stack(|| self.width(ty.ref_type().type_id())),
        }
    }

    /// Structural compatibility of two nodes, ignoring qualifiers.
    ///
    /// Distinct struct, union, enum and function nodes of the same kind have no
    /// compatibility rule yet and report [`TypeError::Unsupported`], as does any
    /// pair involving a user type.
    pub fn is_compatible(&self, a: TypeId, b: TypeId) -> Result<bool, TypeError> {
        let lhs = self.try_get(a)?;
        let rhs = self.try_get(b)?;

        for ty in [lhs, rhs] {
            if ty.is_user_type() {
                return Err(TypeError::Unsupported {
                    op: "is_compatible",
                    kind: TypeKind::User,
                });
            }
        }
        if lhs.kind() != rhs.kind() {
            return Ok(false);
        }

        match lhs.kind() {
            TypeKind::Builtin => {
                Ok(lhs.builtin().map(|k| k.name()) == rhs.builtin().map(|k| k.name()))
            }
            TypeKind::Struct | TypeKind::Union | TypeKind::Enum | TypeKind::Func => {
                if a == b {
                    Ok(true)
                } else {
                    Err(TypeError::Unsupported {
                        op: "is_compatible",
                        kind: lhs.kind(),
                    })
                }
            }
            TypeKind::Pointer | TypeKind::Array => ensure_sufficient_stack(|| {
                self.is_compatible(lhs.ref_type().type_id(), rhs.ref_type().type_id())
            }),
            // Rejected above.
            TypeKind::User => Ok(false),
        }
    }

    /// The alias expression at the bottom of `id`, looking through pointers
    /// and arrays.
    pub fn base_user_expr(&self, id: TypeId) -> Result<&'ast dyn Expr, TypeError> {
        let ty = self.try_get(id)?;
        match ty.kind() {
            TypeKind::User => ty.user_expr().ok_or(TypeError::InvalidOperation {
                op: "base_user_expr",
                kind: TypeKind::User,
                reason: "the user type has no name expression",
            }),
            TypeKind::Pointer | TypeKind::Array => {
                ensure_sufficient_stack(|| self.base_user_expr(ty.ref_type().type_id()))
            }
            kind => Err(TypeError::InvalidOperation {
                op: "base_user_expr",
                kind,
                reason: "only user types and their pointers or arrays name an alias",
            }),
        }
    }
}
