//! Member declarations owned by struct, union and enum nodes.

use std::fmt;

use c2_ir::Expr;

use crate::QualType;

/// A member as seen by the type system: a name and a type.
///
/// For enums the members are the enum constants and `value` is the optional
/// initializer expression.
pub trait MemberDecl: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn ty(&self) -> QualType;

    fn value(&self) -> Option<&dyn Expr> {
        None
    }
}

/// Plain member declaration.
#[derive(Debug)]
pub struct FieldDecl {
    pub name: String,
    pub ty: QualType,
    pub value: Option<Box<dyn Expr>>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        FieldDecl {
            name: name.into(),
            ty,
            value: None,
        }
    }

    /// Enum constant with an explicit value.
    pub fn with_value(name: impl Into<String>, ty: QualType, value: Box<dyn Expr>) -> Self {
        FieldDecl {
            name: name.into(),
            ty,
            value: Some(value),
        }
    }
}

impl MemberDecl for FieldDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn ty(&self) -> QualType {
        self.ty
    }

    fn value(&self) -> Option<&dyn Expr> {
        self.value.as_deref()
    }
}
