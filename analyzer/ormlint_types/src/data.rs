//! Interned type representation.
//!
//! `TyData` is the representation stored in the [`TyInterner`](crate::TyInterner).
//! External code works with `TyId` (u32 indices) for O(1) equality.

use std::fmt;

use crate::Name;

/// Interned type handle.
///
/// A plain index into the [`TyInterner`](crate::TyInterner) that produced it.
/// Atom types are pre-interned at fixed indices, so the constants below are
/// valid for every interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TyId(u32);

impl TyId {
    /// The top type: anything at all.
    pub const MIXED: TyId = TyId(0);
    /// The empty union (bottom).
    pub const NEVER: TyId = TyId(1);
    /// The null type.
    pub const NULL: TyId = TyId(2);
    /// Boolean scalar.
    pub const BOOL: TyId = TyId(3);
    /// Integer scalar.
    pub const INT: TyId = TyId(4);
    /// Float scalar.
    pub const FLOAT: TyId = TyId(5);
    /// String scalar.
    pub const STR: TyId = TyId(6);
    /// Late-static-binding placeholder in declared signatures.
    pub const STATIC: TyId = TyId(7);

    /// Number of pre-interned atoms.
    pub(crate) const ATOMS: u32 = 8;

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TyId(raw)
    }

    /// Index into the owning interner's storage.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TyId({})", self.0)
    }
}

/// Type representation stored in the interner.
///
/// Compound types store `TyId` children, not boxed types, enabling O(1)
/// equality and cheap structural sharing.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TyData {
    // Atoms (pre-interned at fixed indices)
    /// The top type
    Mixed,
    /// The empty union (bottom)
    Never,
    /// Null
    Null,
    /// Boolean scalar
    Bool,
    /// Integer scalar
    Int,
    /// Float scalar
    Float,
    /// String scalar
    Str,
    /// Late-static-binding placeholder (`static` in declared signatures)
    Static,

    // Classes
    /// Instance of a named class
    Object(Name),

    /// Applied generic class: the class name with concrete type arguments.
    /// A model collection is `Generic { name: "Collection", args: [INT, model] }`.
    Generic {
        /// The generic class name
        name: Name,
        /// The type arguments
        args: Box<[TyId]>,
    },

    // Structural types
    /// Array type. A `mixed` key accepts any key type.
    Array {
        /// Key type
        key: TyId,
        /// Value type
        value: TyId,
    },

    /// Structural iterable: anything traversable with the given key/value types.
    Iterable {
        /// Key type
        key: TyId,
        /// Value type
        value: TyId,
    },

    /// Union of alternatives.
    ///
    /// # Invariant
    ///
    /// Members **must** be sorted by raw id, deduplicated, flat (no nested
    /// unions), at least two, and never contain `Mixed` or `Never`. Build
    /// unions through [`combine::union`](crate::combine::union) to maintain this.
    Union(Box<[TyId]>),

    /// Class-level template placeholder (e.g. the model parameter of a
    /// generic builder), resolved from the declaring class's template map.
    Template(Name),
}

impl TyData {
    /// Check if this is a pre-interned atom.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            TyData::Mixed
                | TyData::Never
                | TyData::Null
                | TyData::Bool
                | TyData::Int
                | TyData::Float
                | TyData::Str
                | TyData::Static
        )
    }

    /// Check if this is a union.
    pub fn is_union(&self) -> bool {
        matches!(self, TyData::Union(_))
    }
}
