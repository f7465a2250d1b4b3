//! Qualified type handles.
//!
//! A [`QualType`] names a type node by [`TypeId`] and carries the qualifiers of
//! one use site. Handles are `Copy`, compare by identity (same node and same
//! qualifiers) and never own the node they refer to.

use c2_ir::StringBuilder;

use crate::{Qualifiers, Recursion, Type, TypeContext, TypeError, TypeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualType {
    ty: TypeId,
    quals: Qualifiers,
}

impl Default for QualType {
    fn default() -> Self {
        Self::NULL
    }
}

impl QualType {
    /// The handle that refers to no type.
    pub const NULL: Self = QualType {
        ty: TypeId::NONE,
        quals: Qualifiers::empty(),
    };

    pub const fn new(ty: TypeId) -> Self {
        QualType {
            ty,
            quals: Qualifiers::empty(),
        }
    }

    pub const fn with_qualifiers(ty: TypeId, quals: Qualifiers) -> Self {
        QualType { ty, quals }
    }

    pub const fn is_null(self) -> bool {
        self.ty.is_none()
    }

    pub const fn is_valid(self) -> bool {
        !self.is_null()
    }

    /// The referenced node.
    ///
    /// # Panics
    ///
    /// On a NULL handle. Use [`QualType::try_type_id`] where NULL is expected.
    pub fn type_id(self) -> TypeId {
        assert!(self.is_valid(), "cannot retrieve a NULL type");
        self.ty
    }

    pub fn try_type_id(self) -> Result<TypeId, TypeError> {
        if self.is_null() {
            Err(TypeError::NullType)
        } else {
            Ok(self.ty)
        }
    }

    pub const fn qualifiers(self) -> Qualifiers {
        self.quals
    }

    pub fn set_qualifiers(&mut self, quals: Qualifiers) {
        self.quals = quals;
    }

    pub fn add_const(&mut self) {
        self.quals.insert(Qualifiers::CONST);
    }

    pub fn add_volatile(&mut self) {
        self.quals.insert(Qualifiers::VOLATILE);
    }

    pub const fn is_const(self) -> bool {
        self.quals.contains(Qualifiers::CONST)
    }

    pub const fn is_volatile(self) -> bool {
        self.quals.contains(Qualifiers::VOLATILE)
    }

    /// Same node, no qualifiers.
    pub const fn unqualified(self) -> Self {
        Self::new(self.ty)
    }

    /// The node behind this handle.
    pub fn get<'c, 'ast>(self, ctx: &'c TypeContext<'ast>) -> Result<&'c Type<'ast>, TypeError> {
        ctx.try_get(self.try_type_id()?)
    }

    /// The node's canonical type carrying this handle's qualifiers.
    ///
    /// NULL if the node has no canonical type assigned yet.
    pub fn canonical_type(self, ctx: &TypeContext<'_>) -> Result<QualType, TypeError> {
        let canonical = self.get(ctx)?.canonical_type();
        if canonical.is_null() {
            return Ok(QualType::NULL);
        }
        Ok(QualType::with_qualifiers(canonical.ty, self.quals))
    }

    // === Kind queries ===

    fn test<'ast>(self, ctx: &TypeContext<'ast>, pred: impl FnOnce(&Type<'ast>) -> bool) -> bool {
        pred(ctx.get(self.type_id()))
    }

    /// # Panics
    ///
    /// On a NULL handle or an id `ctx` did not issue. The same holds for every
    /// other kind query.
    pub fn is_builtin_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_builtin_type)
    }

    pub fn is_user_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_user_type)
    }

    pub fn is_struct_or_union_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_struct_or_union_type)
    }

    pub fn is_enum_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_enum_type)
    }

    pub fn is_func_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_func_type)
    }

    pub fn is_pointer_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_pointer_type)
    }

    pub fn is_array_type(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_array_type)
    }

    pub fn is_subscriptable(self, ctx: &TypeContext<'_>) -> bool {
        self.test(ctx, Type::is_subscriptable)
    }

    // === Relations ===

    pub fn is_compatible(self, other: QualType, ctx: &TypeContext<'_>) -> Result<bool, TypeError> {
        ctx.is_compatible(self.try_type_id()?, other.try_type_id()?)
    }

    pub fn width(self, ctx: &TypeContext<'_>) -> Result<u32, TypeError> {
        ctx.width(self.try_type_id()?)
    }

    // === Rendering ===

    pub fn print_name(self, ctx: &TypeContext<'_>, buf: &mut StringBuilder) -> Result<(), TypeError> {
        ctx.print_name(self, buf)
    }

    pub fn print_full(
        self,
        ctx: &TypeContext<'_>,
        buf: &mut StringBuilder,
        indent: usize,
    ) -> Result<(), TypeError> {
        ctx.print_full(self, buf, indent)
    }

    pub fn print_effective(self, ctx: &TypeContext<'_>, buf: &mut StringBuilder) {
        ctx.print_effective(self, buf);
    }

    pub fn print(self, ctx: &TypeContext<'_>, buf: &mut StringBuilder, indent: usize, recursion: Recursion) {
        ctx.print_dump(self, buf, indent, recursion);
    }

    /// Write the full dump of this handle to stderr.
    pub fn dump(self, ctx: &TypeContext<'_>) {
        ctx.dump(self);
    }
}
