//! Terminal color selection for diagnostic dumps.

/// Whether a [`StringBuilder`](crate::StringBuilder) should emit ANSI markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the destination is a terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean.
    ///
    /// `is_tty` is only consulted for [`ColorMode::Auto`]; detecting it is the
    /// caller's job.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Colors used by the type dumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Resolution targets (`resolved to:`).
    Cyan,
    /// Attribute labels (`size:`, `returns:`).
    Blue,
    /// Member names.
    Green,
    /// Qualifier annotations.
    Yellow,
}

impl Color {
    /// The ANSI escape sequence that switches to this color.
    pub const fn ansi(self) -> &'static str {
        match self {
            Color::Cyan => "\x1b[36m",
            Color::Blue => "\x1b[34m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
        }
    }

    /// The ANSI escape sequence that restores the default color.
    pub const RESET: &'static str = "\x1b[0m";
}
