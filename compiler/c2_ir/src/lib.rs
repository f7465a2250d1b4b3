//! Front-end collaborators shared by the C2 type system.
//!
//! - [`StringBuilder`]: append-only, indentation-aware text sink with optional
//!   ANSI color markers.
//! - [`ColorMode`]: decides whether a sink emits color markers.
//! - [`Expr`]: the opaque expression interface the type system stores for array
//!   sizes and alias names. Types never evaluate expressions, they only print them.

mod color;
mod expr;
mod string_builder;

pub use color::{Color, ColorMode};
pub use expr::{Expr, Identifier, IntegerLiteral};
pub use string_builder::StringBuilder;

/// Indentation step used by every tree-shaped dump.
pub const INDENT: usize = 3;
