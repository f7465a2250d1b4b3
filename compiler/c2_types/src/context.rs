//! The per-compilation-unit type arena.
//!
//! A [`TypeContext`] owns every non-builtin node created while analysing one
//! unit. Nodes are addressed by [`TypeId`], live as long as the context and are
//! released together when it is dropped. Builtins are resolved through the
//! process-wide registry and never stored here.
//!
//! Pointer types are interned: asking twice for a pointer to the same handle
//! (same node and same qualifiers) yields the same node. Every other factory
//! creates a fresh node per call.

use c2_ir::Expr;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{builtin_type, ArraySize, BuiltinKind, Members, QualType, Type, TypeError, TypeId, TypeKind};

pub struct TypeContext<'ast> {
    types: Vec<Type<'ast>>,
    /// Element handle to the pointer node built for it.
    pointers: FxHashMap<QualType, TypeId>,
}

impl Default for TypeContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ast> TypeContext<'ast> {
    pub fn new() -> Self {
        TypeContext {
            types: Vec::new(),
            pointers: FxHashMap::default(),
        }
    }

    /// Pre-size storage for roughly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        TypeContext {
            types: Vec::with_capacity(capacity),
            pointers: FxHashMap::with_capacity_and_hasher(capacity / 4, Default::default()),
        }
    }

    fn push(&mut self, mut ty: Type<'ast>) -> TypeId {
        let id = TypeId::from_dynamic_index(self.types.len());
        if ty.kind().is_self_canonical() {
            ty.set_canonical_type(QualType::new(id));
        }
        trace!(?id, kind = %ty.kind(), "created type");
        self.types.push(ty);
        id
    }

    // === Lookup ===

    /// # Panics
    ///
    /// On [`TypeId::NONE`] or an id issued by another context.
    pub fn get(&self, id: TypeId) -> &Type<'ast> {
        match self.try_get(id) {
            Ok(ty) => ty,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_get(&self, id: TypeId) -> Result<&Type<'ast>, TypeError> {
        if let Some(kind) = id.builtin_kind() {
            return Ok(builtin_type(kind));
        }
        if id.is_none() {
            return Err(TypeError::NullType);
        }
        id.dynamic_index()
            .and_then(|index| self.types.get(index))
            .ok_or(TypeError::UnknownType(id))
    }

    /// Mutable access to a node this context owns. Builtins are immutable.
    pub fn get_mut(&mut self, id: TypeId) -> Result<&mut Type<'ast>, TypeError> {
        if id.is_builtin() {
            return Err(TypeError::InvalidOperation {
                op: "get_mut",
                kind: TypeKind::Builtin,
                reason: "builtin types are shared and immutable",
            });
        }
        if id.is_none() {
            return Err(TypeError::NullType);
        }
        id.dynamic_index()
            .and_then(|index| self.types.get_mut(index))
            .ok_or(TypeError::UnknownType(id))
    }

    /// Whether `id` resolves in this context (builtins always do).
    pub fn contains(&self, id: TypeId) -> bool {
        self.try_get(id).is_ok()
    }

    /// Number of nodes owned by this context.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Owned nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type<'ast>)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (TypeId::from_dynamic_index(index), ty))
    }

    /// Unqualified handle to a builtin.
    pub fn builtin(&self, kind: BuiltinKind) -> QualType {
        QualType::new(kind.type_id())
    }

    // === Factories ===

    /// A fresh alias node named by `expr`, unresolved until [`Self::set_ref_type`].
    pub fn get_user(&mut self, expr: &'ast dyn Expr) -> TypeId {
        let mut ty = Self::fresh(TypeKind::User);
        ty.set_user_expr(expr);
        self.push(ty)
    }

    /// The pointer node for `elem`, created on first request.
    pub fn get_pointer(&mut self, elem: QualType) -> Result<QualType, TypeError> {
        if let Some(&id) = self.pointers.get(&elem) {
            trace!(?id, "reused pointer type");
            return Ok(QualType::new(id));
        }
        let ty = Type::new(TypeKind::Pointer, elem)?;
        let id = self.push(ty);
        self.pointers.insert(elem, id);
        Ok(QualType::new(id))
    }

    /// A fresh struct (`is_struct`) or union node. `name` is empty when anonymous.
    pub fn get_struct(&mut self, is_struct: bool, name: &str) -> TypeId {
        let kind = if is_struct {
            TypeKind::Struct
        } else {
            TypeKind::Union
        };
        let mut ty = Self::fresh(kind);
        ty.set_tag_name(name);
        self.push(ty)
    }

    pub fn get_enum(&mut self, name: &str) -> TypeId {
        let mut ty = Self::fresh(TypeKind::Enum);
        ty.set_tag_name(name);
        self.push(ty)
    }

    /// A fresh array node. Arrays are never shared, even for equal operands.
    pub fn get_array(
        &mut self,
        elem: QualType,
        size: Option<ArraySize<'ast>>,
    ) -> Result<QualType, TypeError> {
        let mut ty = Type::new(TypeKind::Array, elem)?;
        ty.set_array_size(size);
        Ok(QualType::new(self.push(ty)))
    }

    /// A fresh function node returning `ret`, with no arguments yet.
    pub fn get_function(&mut self, ret: QualType) -> TypeId {
        let mut ty = Self::fresh(TypeKind::Func);
        // Cannot fail: `ty` is a function node.
        let _ = ty.set_return_type(ret);
        self.push(ty)
    }

    fn fresh(kind: TypeKind) -> Type<'ast> {
        match Type::new(kind, QualType::NULL) {
            Ok(ty) => ty,
            Err(err) => unreachable!("{err}"),
        }
    }

    // === Late binding ===

    pub fn set_members(&mut self, id: TypeId, members: Members<'ast>) -> Result<(), TypeError> {
        self.get_mut(id)?
            .set_members(members)
            .inspect_err(|err| debug!(?id, %err, "rejected member list"))
    }

    pub fn set_return_type(&mut self, id: TypeId, ret: QualType) -> Result<(), TypeError> {
        self.get_mut(id)?
            .set_return_type(ret)
            .inspect_err(|err| debug!(?id, %err, "rejected return type"))
    }

    pub fn add_argument(&mut self, id: TypeId, arg: QualType) -> Result<(), TypeError> {
        self.get_mut(id)?
            .add_argument(arg)
            .inspect_err(|err| debug!(?id, %err, "rejected argument"))
    }

    /// Resolve a user type to its target.
    pub fn set_ref_type(&mut self, id: TypeId, target: QualType) -> Result<(), TypeError> {
        if self.reaches(target, id)? {
            debug!(?id, ?target, "rejected alias cycle");
            return Err(TypeError::InvalidOperation {
                op: "set_ref_type",
                kind: TypeKind::User,
                reason: "the alias target refers back to this user type",
            });
        }
        self.get_mut(id)?
            .set_ref_type(target)
            .inspect_err(|err| debug!(?id, %err, "rejected alias target"))
    }

    /// Whether following `from` through aliases, pointers and arrays reaches
    /// `id`. Struct, union, enum, function and builtin nodes end the walk.
    fn reaches(&self, from: QualType, id: TypeId) -> Result<bool, TypeError> {
        let mut current = from;
        while current.is_valid() {
            let cur = current.type_id();
            if cur == id {
                return Ok(true);
            }
            let ty = self.try_get(cur)?;
            match ty.kind() {
                TypeKind::User | TypeKind::Pointer | TypeKind::Array => current = ty.ref_type(),
                _ => break,
            }
        }
        Ok(false)
    }

    /// Record the canonical form of a user, pointer or array node.
    pub fn set_canonical_type(&mut self, id: TypeId, canonical: QualType) -> Result<(), TypeError> {
        let ty = self.get_mut(id)?;
        if ty.kind().is_self_canonical() {
            return Err(TypeError::InvalidOperation {
                op: "set_canonical_type",
                kind: ty.kind(),
                reason: "the node is its own canonical type",
            });
        }
        ty.set_canonical_type(canonical);
        Ok(())
    }
}

impl Drop for TypeContext<'_> {
    fn drop(&mut self) {
        debug!(types = self.types.len(), "releasing type context");
    }
}

impl std::fmt::Debug for TypeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeContext")
            .field("types", &self.types.len())
            .field("pointers", &self.pointers.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap factory results known to be valid")]
mod tests;
