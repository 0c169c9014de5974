//! Pre-computed type metadata flags.
//!
//! `TyFlags` are computed once at type interning time and cached, enabling
//! O(1) queries about type properties without traversal. Narrowing decisions
//! read these instead of re-walking the type.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    ///
    /// Computed once at interning time, never recomputed.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TyFlags: u32 {
        // === Presence flags (bits 0-7) ===
        // Track what elements a type contains.

        /// Contains a class-level template placeholder.
        const HAS_TEMPLATE = 1 << 0;
        /// Contains the late-static-binding placeholder.
        const HAS_STATIC = 1 << 1;
        /// Contains null (the type accepts null).
        const HAS_NULL = 1 << 2;

        // === Category flags (bits 8-15) ===
        // Classify types for fast dispatch.

        /// Scalar type (bool, int, float, string).
        const IS_SCALAR = 1 << 8;
        /// Object or applied generic class.
        const IS_OBJECT = 1 << 9;
        /// Array type.
        const IS_ARRAY = 1 << 10;
        /// Union of alternatives.
        const IS_UNION = 1 << 11;

        // === Shape flags (bits 16-23) ===

        /// Structurally iterable (arrays and iterables; class-based
        /// iterability is the reflection layer's concern).
        const IS_ITERABLE = 1 << 16;
    }
}

impl TyFlags {
    /// Flags that propagate from child types to parents.
    ///
    /// When interning a compound type, these flags are inherited from all
    /// child types via bitwise OR.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_TEMPLATE.bits() | Self::HAS_STATIC.bits() | Self::HAS_NULL.bits(),
    );

    /// Check if the type contains placeholders needing substitution.
    #[inline]
    pub const fn needs_subst(self) -> bool {
        self.intersects(Self::HAS_TEMPLATE.union(Self::HAS_STATIC))
    }

    /// Check if the type accepts null.
    #[inline]
    pub const fn has_null(self) -> bool {
        self.contains(Self::HAS_NULL)
    }

    /// Check if the type is structurally iterable.
    #[inline]
    pub const fn is_iterable(self) -> bool {
        self.contains(Self::IS_ITERABLE)
    }

    /// Check if the type is a union.
    #[inline]
    pub const fn is_union(self) -> bool {
        self.contains(Self::IS_UNION)
    }

    /// Combine flags from a child type (for compound types).
    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    /// Combine propagated flags from multiple children.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        let mut result = Self::empty();
        for child in children {
            result = result.union(Self::propagate_from(child));
        }
        result
    }
}

impl Default for TyFlags {
    fn default() -> Self {
        Self::empty()
    }
}
