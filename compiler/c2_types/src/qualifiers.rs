//! Use-site type qualifiers.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Qualifiers attached to a [`QualType`](crate::QualType).
    ///
    /// They belong to the use site, never to the `Type` node itself, so the same
    /// node can appear bare, `const` or `volatile` in different places.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Qualifiers: u8 {
        const CONST = 1 << 1;
        const VOLATILE = 1 << 2;
    }
}

impl Qualifiers {
    /// Source keywords in display order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        [(Self::CONST, "const"), (Self::VOLATILE, "volatile")]
            .into_iter()
            .filter(move |&(flag, _)| self.contains(flag))
            .map(|(_, kw)| kw)
    }
}

/// Space-separated keywords, e.g. `const volatile`. Empty for no qualifiers.
impl fmt::Display for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kw) in self.keywords().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(kw)?;
        }
        Ok(())
    }
}
