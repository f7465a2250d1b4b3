//! Append-only text sink used by every type printer.

use std::fmt;

use crate::{Color, ColorMode};

/// In-memory text buffer with indentation and optional color markers.
///
/// Printers only ever append; nothing in the front end reads back from a
/// builder except to hand the finished text to a diagnostic stream.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct StringBuilder {
    buffer: String,
    colors: bool,
}

impl StringBuilder {
    /// Create an empty builder that never emits color markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder, resolving `mode` against `is_tty`.
    pub fn with_color_mode(mode: ColorMode, is_tty: bool) -> Self {
        StringBuilder {
            buffer: String::new(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Whether color markers are emitted.
    pub fn uses_colors(&self) -> bool {
        self.colors
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append `width` spaces.
    pub fn indent(&mut self, width: usize) {
        self.buffer.extend(std::iter::repeat(' ').take(width));
    }

    /// Append `text` in `color`, or as plain text when colors are off.
    pub fn push_colored(&mut self, color: Color, text: &str) {
        if self.colors {
            self.buffer.push_str(color.ansi());
            self.buffer.push_str(text);
            self.buffer.push_str(Color::RESET);
        } else {
            self.buffer.push_str(text);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop the contents, keeping the color setting and allocation.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl fmt::Write for StringBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl fmt::Display for StringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

impl fmt::Debug for StringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.buffer, f)
    }
}

#[cfg(test)]
mod tests;
