//! Human-readable type rendering.
//!
//! Used by trace logging and test assertions. Rendering needs both the type
//! interner (structure) and the string interner (names), so it lives behind
//! a small display adapter rather than a `Display` impl on `TyId`.

use std::fmt;

use crate::{StringInterner, TyData, TyId, TyInterner};

/// Display adapter for a `TyId`.
pub struct TyDisplay<'a> {
    pool: &'a TyInterner,
    strings: &'a StringInterner,
    id: TyId,
}

impl<'a> TyDisplay<'a> {
    /// Create a display adapter for `id`.
    pub fn new(pool: &'a TyInterner, strings: &'a StringInterner, id: TyId) -> Self {
        Self { pool, strings, id }
    }

    fn child(&self, id: TyId) -> TyDisplay<'a> {
        TyDisplay::new(self.pool, self.strings, id)
    }
}

impl TyInterner {
    /// Render `id` with names resolved through `strings`.
    pub fn display<'a>(&'a self, id: TyId, strings: &'a StringInterner) -> TyDisplay<'a> {
        TyDisplay::new(self, strings, id)
    }
}

impl fmt::Display for TyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pool.lookup(self.id) {
            TyData::Mixed => f.write_str("mixed"),
            TyData::Never => f.write_str("never"),
            TyData::Null => f.write_str("null"),
            TyData::Bool => f.write_str("bool"),
            TyData::Int => f.write_str("int"),
            TyData::Float => f.write_str("float"),
            TyData::Str => f.write_str("string"),
            TyData::Static => f.write_str("static"),
            TyData::Object(name) | TyData::Template(name) => {
                f.write_str(self.strings.lookup(name))
            }
            TyData::Generic { name, args } => {
                write!(f, "{}<", self.strings.lookup(name))?;
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.child(arg))?;
                }
                f.write_str(">")
            }
            TyData::Array { key, value } => {
                write!(f, "array<{}, {}>", self.child(key), self.child(value))
            }
            TyData::Iterable { key, value } => {
                write!(f, "iterable<{}, {}>", self.child(key), self.child(value))
            }
            TyData::Union(members) => {
                for (i, &member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", self.child(member))?;
                }
                Ok(())
            }
        }
    }
}
