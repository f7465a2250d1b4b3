//! Textual forms of types.
//!
//! Four independent contracts, all appending to a [`StringBuilder`]:
//!
//! - **name** (`print_name`): the shortest token sequence naming the type,
//!   e.g. `(struct)Point*`. Function types have no name form.
//! - **full** (`print_full`): expands struct and union bodies member by member.
//! - **effective** (`print_effective`): one line, struct/union/enum collapsed
//!   to a bare kind marker. Used for diagnostics.
//! - **dump** (`print_dump`): an indented debugging tree, bounded by
//!   [`Recursion`].
//!
//! Every form renders a NULL handle as `NULL`.

use std::fmt::Write;

use c2_ir::{Color, StringBuilder, INDENT};
use c2_stack::ensure_sufficient_stack;

use crate::{QualType, Qualifiers, TypeContext, TypeData, TypeError, TypeId, TypeKind};

/// How far the dump follows references out of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Recursion {
    /// Expand resolved aliases and member lists.
    All,
    /// Print only the node's own shape. Breaks cycles through members.
    None,
}

fn push_qualifiers(quals: Qualifiers, buf: &mut StringBuilder) {
    for kw in quals.keywords() {
        buf.push_str(kw);
        buf.push(' ');
    }
}

fn push_unknown(id: TypeId, buf: &mut StringBuilder) {
    let _ = write!(buf, "<invalid {id}>");
}

impl TypeContext<'_> {
    // === Name form ===

    pub fn print_name(&self, qt: QualType, buf: &mut StringBuilder) -> Result<(), TypeError> {
        if qt.is_null() {
            buf.push_str("NULL");
            return Ok(());
        }
        push_qualifiers(qt.qualifiers(), buf);
        self.print_type_name(qt.type_id(), buf)
    }

    pub fn print_type_name(&self, id: TypeId, buf: &mut StringBuilder) -> Result<(), TypeError> {
        let ty = self.try_get(id)?;
        match ty.data() {
            TypeData::Builtin(kind) => buf.push_str(kind.name()),
            TypeData::User { expr } => {
                if ty.ref_type().is_valid() {
                    ensure_sufficient_stack(|| self.print_name(ty.ref_type(), buf))?;
                } else if let Some(expr) = expr {
                    expr.print_inline(buf);
                }
            }
            TypeData::Struct(c) | TypeData::Union(c) | TypeData::Enum(c) => {
                buf.push('(');
                buf.push_str(ty.kind().name());
                buf.push(')');
                buf.push_str(&c.name);
            }
            TypeData::Func { .. } => {
                return Err(TypeError::InvalidOperation {
                    op: "print_name",
                    kind: TypeKind::Func,
                    reason: "function types are named by their signature",
                })
            }
            TypeData::Pointer => {
                ensure_sufficient_stack(|| self.print_name(ty.ref_type(), buf))?;
                buf.push('*');
            }
            TypeData::Array { size } => {
                ensure_sufficient_stack(|| self.print_name(ty.ref_type(), buf))?;
                buf.push('[');
                if let Some(size) = size {
                    size.expr().print_inline(buf);
                }
                buf.push(']');
            }
        }
        Ok(())
    }

    // === Full form ===

    /// Full form starting at column `indent`.
    ///
    /// Member lines are written at `indent + INDENT` and the closing brace at
    /// `indent`.
    pub fn print_full(
        &self,
        qt: QualType,
        buf: &mut StringBuilder,
        indent: usize,
    ) -> Result<(), TypeError> {
        buf.indent(indent);
        let mut active = Vec::new();
        self.full(qt, buf, indent, &mut active)
    }

    /// `active` holds the structs and unions being expanded by a caller.
    fn full(
        &self,
        qt: QualType,
        buf: &mut StringBuilder,
        indent: usize,
        active: &mut Vec<TypeId>,
    ) -> Result<(), TypeError> {
        if qt.is_null() {
            buf.push_str("NULL");
            return Ok(());
        }
        push_qualifiers(qt.qualifiers(), buf);

        let id = qt.type_id();
        let ty = self.try_get(id)?;
        match ty.data() {
            TypeData::Builtin(kind) => buf.push_str(kind.name()),
            TypeData::User { expr } => {
                if ty.ref_type().is_valid() {
                    ensure_sufficient_stack(|| self.full(ty.ref_type(), buf, indent, active))?;
                } else if let Some(expr) = expr {
                    expr.print_inline(buf);
                }
            }
            TypeData::Struct(c) | TypeData::Union(c) => {
                if active.contains(&id) {
                    return self.print_type_name(id, buf);
                }
                buf.push_str(ty.kind().name());
                if !c.name.is_empty() {
                    buf.push(' ');
                    buf.push_str(&c.name);
                }
                buf.push_str(" {\n");

                active.push(id);
                for member in ty.members().unwrap_or_default() {
                    buf.indent(indent + INDENT);
                    ensure_sufficient_stack(|| self.full(member.ty(), buf, indent + INDENT, active))?;
                    buf.push(' ');
                    buf.push_str(member.name());
                    buf.push_str(";\n");
                }
                active.pop();

                buf.indent(indent);
                buf.push('}');
            }
            // Enum constants are not expanded.
            TypeData::Enum(c) => {
                buf.push_str("enum");
                if !c.name.is_empty() {
                    buf.push(' ');
                    buf.push_str(&c.name);
                }
            }
            TypeData::Func { args } => {
                buf.push_str("func ");
                self.print_name(ty.ref_type(), buf)?;
                buf.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.print_name(*arg, buf)?;
                }
                buf.push(')');
            }
            TypeData::Pointer => {
                ensure_sufficient_stack(|| self.full(ty.ref_type(), buf, indent, active))?;
                buf.push('*');
            }
            TypeData::Array { size } => {
                ensure_sufficient_stack(|| self.full(ty.ref_type(), buf, indent, active))?;
                buf.push('[');
                if let Some(size) = size {
                    size.expr().print_inline(buf);
                }
                buf.push(']');
            }
        }
        Ok(())
    }

    // === Effective form ===

    pub fn print_effective(&self, qt: QualType, buf: &mut StringBuilder) {
        if qt.is_null() {
            buf.push_str("NULL");
            return;
        }
        push_qualifiers(qt.qualifiers(), buf);
        self.print_type_effective(qt.type_id(), buf);
    }

    pub fn print_type_effective(&self, id: TypeId, buf: &mut StringBuilder) {
        let Ok(ty) = self.try_get(id) else {
            push_unknown(id, buf);
            return;
        };
        match ty.data() {
            TypeData::Builtin(kind) => buf.push_str(kind.name()),
            TypeData::User { expr } => {
                if ty.ref_type().is_valid() {
                    ensure_sufficient_stack(|| self.print_effective(ty.ref_type(), buf));
                } else if let Some(expr) = expr {
                    expr.print_inline(buf);
                }
            }
            TypeData::Struct(_) | TypeData::Union(_) | TypeData::Enum(_) => {
                buf.push('(');
                buf.push_str(ty.kind().name());
                buf.push(')');
            }
            TypeData::Func { args } => {
                buf.push_str("func ");
                ensure_sufficient_stack(|| self.print_effective(ty.ref_type(), buf));
                buf.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    ensure_sufficient_stack(|| self.print_effective(*arg, buf));
                }
                buf.push(')');
            }
            TypeData::Pointer => {
                ensure_sufficient_stack(|| self.print_effective(ty.ref_type(), buf));
                buf.push('*');
            }
            TypeData::Array { size } => {
                ensure_sufficient_stack(|| self.print_effective(ty.ref_type(), buf));
                buf.push('[');
                if let Some(size) = size {
                    size.expr().print_inline(buf);
                }
                buf.push(']');
            }
        }
    }

    /// Effective form in single quotes, as diagnostics quote types.
    pub fn diag_name(&self, qt: QualType) -> String {
        format!("'{}'", self.effective_string(qt))
    }

    // === Dump ===

    /// Debugging tree for a handle: the node's tree, then its qualifiers.
    pub fn print_dump(&self, qt: QualType, buf: &mut StringBuilder, indent: usize, recursion: Recursion) {
        if qt.is_null() {
            buf.indent(indent);
            buf.push_str("NULL\n");
            return;
        }
        self.print_type_dump(qt.type_id(), buf, indent, recursion);
        if !qt.qualifiers().is_empty() {
            buf.indent(indent);
            buf.push_str("qualifiers=");
            buf.push_colored(Color::Yellow, &qt.qualifiers().to_string());
            buf.push('\n');
        }
    }

    pub fn print_type_dump(&self, id: TypeId, buf: &mut StringBuilder, indent: usize, recursion: Recursion) {
        buf.indent(indent);
        buf.push_str("[type] ");
        let Ok(ty) = self.try_get(id) else {
            push_unknown(id, buf);
            buf.push('\n');
            return;
        };

        let child = indent + INDENT;
        match ty.data() {
            TypeData::Builtin(kind) => {
                buf.push_str("(builtin) ");
                buf.push_str(kind.name());
                buf.push('\n');
            }
            TypeData::User { expr } => {
                buf.push_str("(user)\n");
                if let Some(expr) = expr {
                    expr.print(buf, child);
                }
                if ty.ref_type().is_valid() && recursion == Recursion::All {
                    buf.indent(child);
                    buf.push_colored(Color::Cyan, "resolved to:");
                    buf.push(' ');
                    self.print_effective(ty.ref_type(), buf);
                    buf.push('\n');
                }
            }
            TypeData::Struct(c) | TypeData::Union(c) | TypeData::Enum(c) => {
                buf.push('(');
                buf.push_str(ty.kind().name());
                buf.push_str(") ");
                buf.push_str(&c.name);
                buf.push('\n');
                if recursion == Recursion::All {
                    for member in ty.members().unwrap_or_default() {
                        buf.indent(child);
                        buf.push_colored(Color::Green, "[member]");
                        buf.push(' ');
                        buf.push_str(member.name());
                        buf.push('\n');
                        self.print_dump(member.ty(), buf, child + INDENT, Recursion::None);
                        if let Some(value) = member.value() {
                            value.print(buf, child + INDENT);
                        }
                    }
                }
            }
            TypeData::Func { args } => {
                buf.push_str("(func)\n");
                buf.indent(child);
                buf.push_colored(Color::Blue, "returns:");
                buf.push('\n');
                self.print_dump(ty.ref_type(), buf, child + INDENT, Recursion::None);
                buf.indent(child);
                buf.push_colored(Color::Blue, "args:");
                buf.push('\n');
                for arg in args {
                    self.print_dump(*arg, buf, child + INDENT, Recursion::None);
                }
            }
            TypeData::Pointer => {
                buf.push_str("(pointer)\n");
                ensure_sufficient_stack(|| self.print_dump(ty.ref_type(), buf, child, recursion));
            }
            TypeData::Array { size } => {
                buf.push_str("(array)\n");
                ensure_sufficient_stack(|| self.print_dump(ty.ref_type(), buf, child, recursion));
                if let Some(size) = size {
                    buf.indent(child);
                    buf.push_colored(Color::Blue, "size:");
                    buf.push('\n');
                    size.expr().print(buf, child + INDENT);
                }
            }
        }
    }

    /// Write the full dump of `qt` to stderr.
    pub fn dump(&self, qt: QualType) {
        eprintln!("{}", self.dump_line(qt));
    }

    /// Write the full dump of one node to stderr.
    pub fn dump_type(&self, id: TypeId) {
        eprintln!("{}", self.dump_type_line(id));
    }

    /// The text [`Self::dump`] writes.
    pub fn dump_line(&self, qt: QualType) -> String {
        format!("[QUALTYPE] {}", self.dump_string(qt))
    }

    /// The text [`Self::dump_type`] writes.
    pub fn dump_type_line(&self, id: TypeId) -> String {
        let mut buf = StringBuilder::new();
        self.print_type_dump(id, &mut buf, 0, Recursion::All);
        format!("[TYPE] {buf}")
    }

    // === String helpers ===

    pub fn name_string(&self, qt: QualType) -> Result<String, TypeError> {
        let mut buf = StringBuilder::new();
        self.print_name(qt, &mut buf)?;
        Ok(buf.into_string())
    }

    pub fn full_string(&self, qt: QualType) -> Result<String, TypeError> {
        let mut buf = StringBuilder::new();
        self.print_full(qt, &mut buf, 0)?;
        Ok(buf.into_string())
    }

    pub fn effective_string(&self, qt: QualType) -> String {
        let mut buf = StringBuilder::new();
        self.print_effective(qt, &mut buf);
        buf.into_string()
    }

    /// Dump with [`Recursion::All`] from column 0.
    pub fn dump_string(&self, qt: QualType) -> String {
        let mut buf = StringBuilder::new();
        self.print_dump(qt, &mut buf, 0, Recursion::All);
        buf.into_string()
    }
}
