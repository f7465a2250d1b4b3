//! Type nodes.
//!
//! A [`Type`] is a tagged variant over the eight [`TypeKind`]s. Nodes are built
//! in two phases: the kind (and for pointer/array the element type) is fixed at
//! construction, and the late-bound fields are filled in afterwards through the
//! narrow setters, so recursive and forward-declared types can be expressed.
//!
//! Ownership: a node owns its member or argument list. An array owns its size
//! expression only when tagged [`ArraySize::Owned`]. `ref_type` is always a
//! handle to a node owned elsewhere and is never released by this node.

use c2_ir::Expr;
use smallvec::SmallVec;

use crate::{BuiltinKind, MemberDecl, QualType, TypeError, TypeKind};

/// Member list of a struct, union or enum.
pub type Members<'ast> = Vec<Box<dyn MemberDecl + 'ast>>;

/// Size annotation of an array type, tagged by who owns the expression.
#[derive(Debug)]
pub enum ArraySize<'ast> {
    /// Released together with the array node.
    Owned(Box<dyn Expr + 'ast>),
    /// Owned elsewhere, typically by the declaration the array was written in.
    Borrowed(&'ast dyn Expr),
}

impl ArraySize<'_> {
    pub fn expr(&self) -> &dyn Expr {
        match self {
            ArraySize::Owned(expr) => expr.as_ref(),
            ArraySize::Borrowed(expr) => *expr,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, ArraySize::Owned(_))
    }
}

/// Payload shared by struct, union and enum nodes.
#[derive(Debug, Default)]
pub struct Composite<'ast> {
    /// Tag name; empty for anonymous declarations.
    pub name: Box<str>,
    /// `None` until the body is known. Set at most once.
    pub members: Option<Members<'ast>>,
}

/// Kind-specific payload.
#[derive(Debug)]
pub enum TypeData<'ast> {
    Builtin(BuiltinKind),
    /// The expression naming the alias is borrowed, never owned.
    User { expr: Option<&'ast dyn Expr> },
    Struct(Composite<'ast>),
    Union(Composite<'ast>),
    Enum(Composite<'ast>),
    Func { args: SmallVec<[QualType; 4]> },
    Pointer,
    Array { size: Option<ArraySize<'ast>> },
}

#[derive(Debug)]
pub struct Type<'ast> {
    ref_type: QualType,
    canonical: QualType,
    data: TypeData<'ast>,
}

impl<'ast> Type<'ast> {
    /// Build an empty node of `kind`.
    ///
    /// `ref_type` must be present for `Pointer` and `Array` and absent for
    /// every other kind. Builtins only come from the registry.
    pub fn new(kind: TypeKind, ref_type: QualType) -> Result<Self, TypeError> {
        if kind.requires_ref_type() && ref_type.is_null() {
            return Err(TypeError::InvalidConstruction {
                kind,
                reason: "an element type is required",
            });
        }
        if !kind.requires_ref_type() && !ref_type.is_null() {
            return Err(TypeError::InvalidConstruction {
                kind,
                reason: "no element type is allowed",
            });
        }

        let data = match kind {
            TypeKind::Builtin => {
                return Err(TypeError::InvalidConstruction {
                    kind,
                    reason: "builtin types come from the builtin registry",
                })
            }
            TypeKind::User => TypeData::User { expr: None },
            TypeKind::Struct => TypeData::Struct(Composite::default()),
            TypeKind::Union => TypeData::Union(Composite::default()),
            TypeKind::Enum => TypeData::Enum(Composite::default()),
            TypeKind::Func => TypeData::Func {
                args: SmallVec::new(),
            },
            TypeKind::Pointer => TypeData::Pointer,
            TypeKind::Array => TypeData::Array { size: None },
        };

        Ok(Type {
            ref_type,
            canonical: QualType::NULL,
            data,
        })
    }

    pub(crate) fn from_builtin(kind: BuiltinKind) -> Self {
        Type {
            ref_type: QualType::NULL,
            canonical: QualType::new(kind.type_id()),
            data: TypeData::Builtin(kind),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self.data {
            TypeData::Builtin(_) => TypeKind::Builtin,
            TypeData::User { .. } => TypeKind::User,
            TypeData::Struct(_) => TypeKind::Struct,
            TypeData::Union(_) => TypeKind::Union,
            TypeData::Enum(_) => TypeKind::Enum,
            TypeData::Func { .. } => TypeKind::Func,
            TypeData::Pointer => TypeKind::Pointer,
            TypeData::Array { .. } => TypeKind::Array,
        }
    }

    pub fn data(&self) -> &TypeData<'ast> {
        &self.data
    }

    /// Element (pointer/array), alias target (user) or return type (func).
    pub fn ref_type(&self) -> QualType {
        self.ref_type
    }

    /// NULL until the semantic layer assigns one, for user/pointer/array.
    pub fn canonical_type(&self) -> QualType {
        self.canonical
    }

    pub fn has_canonical_type(&self) -> bool {
        self.canonical.is_valid()
    }

    pub(crate) fn set_canonical_type(&mut self, canonical: QualType) {
        self.canonical = canonical;
    }

    // === Kind queries ===

    pub fn builtin(&self) -> Option<BuiltinKind> {
        match self.data {
            TypeData::Builtin(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_builtin_type(&self) -> bool {
        self.kind() == TypeKind::Builtin
    }

    pub fn is_user_type(&self) -> bool {
        self.kind() == TypeKind::User
    }

    pub fn is_struct_or_union_type(&self) -> bool {
        matches!(self.kind(), TypeKind::Struct | TypeKind::Union)
    }

    pub fn is_enum_type(&self) -> bool {
        self.kind() == TypeKind::Enum
    }

    pub fn is_func_type(&self) -> bool {
        self.kind() == TypeKind::Func
    }

    pub fn is_pointer_type(&self) -> bool {
        self.kind() == TypeKind::Pointer
    }

    pub fn is_array_type(&self) -> bool {
        self.kind() == TypeKind::Array
    }

    /// Pointers and arrays accept `x[i]`.
    pub fn is_subscriptable(&self) -> bool {
        matches!(self.kind(), TypeKind::Pointer | TypeKind::Array)
    }

    // === Struct / Union / Enum ===

    fn composite(&self) -> Option<&Composite<'ast>> {
        match &self.data {
            TypeData::Struct(c) | TypeData::Union(c) | TypeData::Enum(c) => Some(c),
            _ => None,
        }
    }

    /// Tag name of a struct, union or enum.
    pub fn name(&self) -> Option<&str> {
        self.composite().map(|c| &*c.name)
    }

    pub(crate) fn set_tag_name(&mut self, name: &str) {
        if let TypeData::Struct(c) | TypeData::Union(c) | TypeData::Enum(c) = &mut self.data {
            c.name = name.into();
        }
    }

    /// Attach the member list. Only valid once, and only for struct, union and enum.
    pub fn set_members(&mut self, members: Members<'ast>) -> Result<(), TypeError> {
        let kind = self.kind();
        match &mut self.data {
            TypeData::Struct(c) | TypeData::Union(c) | TypeData::Enum(c) => {
                if c.members.is_some() {
                    return Err(TypeError::InvalidOperation {
                        op: "set_members",
                        kind,
                        reason: "members are already set",
                    });
                }
                c.members = Some(members);
                Ok(())
            }
            _ => Err(TypeError::InvalidOperation {
                op: "set_members",
                kind,
                reason: "only struct, union and enum types have members",
            }),
        }
    }

    pub fn members(&self) -> Option<&[Box<dyn MemberDecl + 'ast>]> {
        self.composite().and_then(|c| c.members.as_deref())
    }

    pub fn num_members(&self) -> usize {
        self.members().map_or(0, <[_]>::len)
    }

    /// The `index`-th member, or `None` past the end.
    pub fn member(&self, index: usize) -> Option<&dyn MemberDecl> {
        self.members()
            .and_then(|members| members.get(index))
            .map(|m| &**m as &dyn MemberDecl)
    }

    // === Func ===

    pub fn set_return_type(&mut self, ret: QualType) -> Result<(), TypeError> {
        if !self.is_func_type() {
            return Err(TypeError::InvalidOperation {
                op: "set_return_type",
                kind: self.kind(),
                reason: "only function types have a return type",
            });
        }
        self.ref_type = ret;
        Ok(())
    }

    pub fn return_type(&self) -> QualType {
        if self.is_func_type() {
            self.ref_type
        } else {
            QualType::NULL
        }
    }

    /// Append an argument at the end of the signature.
    pub fn add_argument(&mut self, arg: QualType) -> Result<(), TypeError> {
        let kind = self.kind();
        match &mut self.data {
            TypeData::Func { args } => {
                args.push(arg);
                Ok(())
            }
            _ => Err(TypeError::InvalidOperation {
                op: "add_argument",
                kind,
                reason: "only function types have arguments",
            }),
        }
    }

    pub fn arguments(&self) -> &[QualType] {
        match &self.data {
            TypeData::Func { args } => args,
            _ => &[],
        }
    }

    pub fn num_arguments(&self) -> usize {
        self.arguments().len()
    }

    /// The `index`-th argument, or a NULL handle past the end.
    pub fn get_argument(&self, index: usize) -> QualType {
        self.arguments()
            .get(index)
            .copied()
            .unwrap_or(QualType::NULL)
    }

    // === User ===

    /// Attach the alias target. Cycle checks live in
    /// [`TypeContext::set_ref_type`](crate::TypeContext::set_ref_type).
    pub(crate) fn set_ref_type(&mut self, target: QualType) -> Result<(), TypeError> {
        if !self.is_user_type() {
            return Err(TypeError::InvalidOperation {
                op: "set_ref_type",
                kind: self.kind(),
                reason: "only user types are resolved after construction",
            });
        }
        self.ref_type = target;
        Ok(())
    }

    pub(crate) fn set_user_expr(&mut self, name: &'ast dyn Expr) {
        if let TypeData::User { expr } = &mut self.data {
            *expr = Some(name);
        }
    }

    /// The expression naming a user type.
    pub fn user_expr(&self) -> Option<&'ast dyn Expr> {
        match self.data {
            TypeData::User { expr } => expr,
            _ => None,
        }
    }

    // === Array ===

    pub(crate) fn set_array_size(&mut self, size: Option<ArraySize<'ast>>) {
        if let TypeData::Array { size: slot } = &mut self.data {
            *slot = size;
        }
    }

    pub fn array_size(&self) -> Option<&ArraySize<'ast>> {
        match &self.data {
            TypeData::Array { size } => size.as_ref(),
            _ => None,
        }
    }

    pub fn size_expr(&self) -> Option<&dyn Expr> {
        self.array_size().map(ArraySize::expr)
    }

    /// Whether dropping this node also drops its size expression.
    pub fn owns_size_expr(&self) -> bool {
        self.array_size().is_some_and(ArraySize::is_owned)
    }
}
