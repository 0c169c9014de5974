//! Type interner.
//!
//! Provides O(1) type interning, lookup, and equality comparison via `TyId`,
//! with [`TyFlags`] computed once per entry at interning time.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{Name, TyData, TyFlags, TyId};

/// Error when interning a type fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TyInternError {
    /// The interner exceeded `u32::MAX` entries.
    #[error("type interner exceeded u32::MAX entries")]
    Overflow,
}

struct PoolInner {
    /// Map from type data to index for deduplication.
    map: FxHashMap<TyData, u32>,
    /// Storage for type data and its pre-computed flags, indexed by `TyId`.
    entries: Vec<(TyData, TyFlags)>,
}

impl PoolInner {
    /// Create storage with pre-interned atoms at the fixed `TyId` indices.
    fn with_atoms() -> Self {
        let mut inner = Self {
            map: FxHashMap::default(),
            entries: Vec::with_capacity(64),
        };

        // Order must match the TyId constants.
        let atoms = [
            TyData::Mixed,  // 0 = TyId::MIXED
            TyData::Never,  // 1 = TyId::NEVER
            TyData::Null,   // 2 = TyId::NULL
            TyData::Bool,   // 3 = TyId::BOOL
            TyData::Int,    // 4 = TyId::INT
            TyData::Float,  // 5 = TyId::FLOAT
            TyData::Str,    // 6 = TyId::STR
            TyData::Static, // 7 = TyId::STATIC
        ];

        for (idx, data) in atoms.into_iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "atom count is fixed and small"
            )]
            let idx_u32 = idx as u32;
            let flags = inner.compute_flags(&data);
            inner.map.insert(data.clone(), idx_u32);
            inner.entries.push((data, flags));
        }
        debug_assert_eq!(inner.entries.len(), TyId::ATOMS as usize);

        inner
    }

    fn flags_of(&self, id: TyId) -> TyFlags {
        self.entries[id.index()].1
    }

    /// Compute flags for `data`. Children must already be interned.
    fn compute_flags(&self, data: &TyData) -> TyFlags {
        match data {
            TyData::Mixed | TyData::Never => TyFlags::empty(),
            TyData::Null => TyFlags::HAS_NULL,
            TyData::Bool | TyData::Int | TyData::Float | TyData::Str => TyFlags::IS_SCALAR,
            TyData::Static => TyFlags::HAS_STATIC,
            TyData::Template(_) => TyFlags::HAS_TEMPLATE,
            TyData::Object(_) => TyFlags::IS_OBJECT,
            TyData::Generic { args, .. } => {
                TyFlags::IS_OBJECT
                    | TyFlags::propagate_all(args.iter().map(|&a| self.flags_of(a)))
            }
            TyData::Array { key, value } => {
                TyFlags::IS_ARRAY
                    | TyFlags::IS_ITERABLE
                    | TyFlags::propagate_all([self.flags_of(*key), self.flags_of(*value)])
            }
            TyData::Iterable { key, value } => {
                TyFlags::IS_ITERABLE
                    | TyFlags::propagate_all([self.flags_of(*key), self.flags_of(*value)])
            }
            TyData::Union(members) => {
                let mut flags = TyFlags::IS_UNION
                    | TyFlags::propagate_all(members.iter().map(|&m| self.flags_of(m)));
                // A union is structurally iterable only if every member is.
                if members.iter().all(|&m| self.flags_of(m).is_iterable()) {
                    flags |= TyFlags::IS_ITERABLE;
                }
                flags
            }
        }
    }
}

/// Type interner with per-entry flag caching.
///
/// # Thread Safety
/// A single `RwLock` guards the storage; reads take the lock only long
/// enough to copy out the entry.
///
/// # Pre-interned Atoms
/// Atom types are pre-interned with fixed `TyId` values matching the
/// constants on [`TyId`] (MIXED, NEVER, NULL, etc.).
pub struct TyInterner {
    inner: RwLock<PoolInner>,
}

impl TyInterner {
    /// Create a new interner with pre-interned atoms.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PoolInner::with_atoms()),
        }
    }

    /// Fixed `TyId` for atoms, bypassing the map.
    fn fixed_id(data: &TyData) -> Option<TyId> {
        match data {
            TyData::Mixed => Some(TyId::MIXED),
            TyData::Never => Some(TyId::NEVER),
            TyData::Null => Some(TyId::NULL),
            TyData::Bool => Some(TyId::BOOL),
            TyData::Int => Some(TyId::INT),
            TyData::Float => Some(TyId::FLOAT),
            TyData::Str => Some(TyId::STR),
            TyData::Static => Some(TyId::STATIC),
            _ => None,
        }
    }

    /// Try to intern a type, returning its `TyId` or an error on overflow.
    ///
    /// If the type is already interned, returns the existing `TyId`.
    /// `TyId` children referenced by `data` must come from this interner.
    pub fn try_intern(&self, data: TyData) -> Result<TyId, TyInternError> {
        if let Some(id) = Self::fixed_id(&data) {
            return Ok(id);
        }

        // Fast path: already interned
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(&data) {
                return Ok(TyId::from_raw(idx));
            }
        }

        let mut guard = self.inner.write();

        // Double-check after acquiring the write lock
        if let Some(&idx) = guard.map.get(&data) {
            return Ok(TyId::from_raw(idx));
        }

        let idx = u32::try_from(guard.entries.len()).map_err(|_| TyInternError::Overflow)?;
        let flags = guard.compute_flags(&data);
        guard.entries.push((data.clone(), flags));
        guard.map.insert(data, idx);

        Ok(TyId::from_raw(idx))
    }

    /// Intern a type, returning its `TyId`.
    ///
    /// # Panics
    /// Panics on interner overflow. Use [`try_intern`](Self::try_intern) for
    /// fallible interning.
    pub fn intern(&self, data: TyData) -> TyId {
        self.try_intern(data).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the type data for a `TyId`.
    ///
    /// # Panics
    /// Panics if the `TyId` was not created by this interner.
    pub fn lookup(&self, id: TyId) -> TyData {
        self.inner.read().entries[id.index()].0.clone()
    }

    /// Pre-computed flags for a `TyId`.
    ///
    /// # Panics
    /// Panics if the `TyId` was not created by this interner.
    pub fn flags(&self, id: TyId) -> TyFlags {
        self.inner.read().flags_of(id)
    }

    // Convenience constructors.
    //
    // All of these go through `intern()`, which guarantees deduplication:
    // the same arguments always return the same `TyId`.

    /// Instance of a named class.
    pub fn object(&self, name: Name) -> TyId {
        self.intern(TyData::Object(name))
    }

    /// Applied generic class.
    pub fn generic(&self, name: Name, args: impl Into<Box<[TyId]>>) -> TyId {
        self.intern(TyData::Generic {
            name,
            args: args.into(),
        })
    }

    /// Array type.
    pub fn array(&self, key: TyId, value: TyId) -> TyId {
        self.intern(TyData::Array { key, value })
    }

    /// Structural iterable type.
    pub fn iterable(&self, key: TyId, value: TyId) -> TyId {
        self.intern(TyData::Iterable { key, value })
    }

    /// Class-level template placeholder.
    pub fn template(&self, name: Name) -> TyId {
        self.intern(TyData::Template(name))
    }

    /// Union of `ty` with null.
    pub fn nullable(&self, ty: TyId) -> TyId {
        crate::combine::union(self, [ty, TyId::NULL])
    }

    /// Number of interned types (including pre-interned atoms).
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check if the interner has only pre-interned atoms.
    pub fn is_empty(&self) -> bool {
        self.len() <= TyId::ATOMS as usize
    }
}

impl Default for TyInterner {
    fn default() -> Self {
        Self::new()
    }
}
