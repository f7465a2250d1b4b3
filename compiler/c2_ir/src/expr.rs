//! Opaque expression interface consumed by the type system.
//!
//! Array types carry a size expression and alias (`User`) types carry the
//! expression naming the alias. The type system stores and prints these but
//! never evaluates them.

use std::fmt::{self, Write};

use crate::{StringBuilder, INDENT};

/// An expression node as seen by the type system.
///
/// `Send + Sync` is required because builtin types are shared process-wide
/// and the `Type` representation holds expression references.
pub trait Expr: fmt::Debug + Send + Sync {
    /// Render the expression as source text, e.g. the `10` in `int[10]`.
    fn print_inline(&self, buf: &mut StringBuilder);

    /// Render the expression as an indented tree for diagnostic dumps.
    ///
    /// Writes complete lines, each starting at `indent`.
    fn print(&self, buf: &mut StringBuilder, indent: usize);
}

/// Unsigned integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub value: u64,
}

impl IntegerLiteral {
    pub fn new(value: u64) -> Self {
        IntegerLiteral { value }
    }
}

impl Expr for IntegerLiteral {
    fn print_inline(&self, buf: &mut StringBuilder) {
        let _ = write!(buf, "{}", self.value);
    }

    fn print(&self, buf: &mut StringBuilder, indent: usize) {
        buf.indent(indent);
        let _ = writeln!(buf, "[integer] {}", self.value);
    }
}

/// Identifier reference, optionally qualified by a module (`pkg.Name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub module: Option<String>,
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier {
            module: None,
            name: name.into(),
        }
    }

    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        Identifier {
            module: Some(module.into()),
            name: name.into(),
        }
    }
}

impl Expr for Identifier {
    fn print_inline(&self, buf: &mut StringBuilder) {
        if let Some(module) = &self.module {
            buf.push_str(module);
            buf.push('.');
        }
        buf.push_str(&self.name);
    }

    fn print(&self, buf: &mut StringBuilder, indent: usize) {
        buf.indent(indent);
        buf.push_str("[identifier] ");
        self.print_inline(buf);
        buf.push('\n');
        if let Some(module) = &self.module {
            buf.indent(indent + INDENT);
            let _ = writeln!(buf, "module={module}");
        }
    }
}
