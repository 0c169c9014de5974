//! String interner for analyzed-language identifiers.
//!
//! Provides O(1) interning and lock-free lookup with thread-safe access.
//! Interned strings are leaked into `'static` storage, so `lookup` can hand
//! out references without holding the lock; the interner is expected to live
//! for the whole analysis run.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternError {
    /// The interner exceeded `u32::MAX` entries.
    #[error("string interner exceeded u32::MAX entries")]
    Overflow,
}

struct InternInner {
    /// Map from string content to index for deduplication.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

impl InternInner {
    fn with_empty() -> Self {
        let mut inner = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        // Pre-intern the empty string at index 0 (Name::EMPTY)
        inner.map.insert("", 0);
        inner.strings.push("");
        inner
    }
}

/// Thread-safe string interner.
///
/// # Thread Safety
/// A single `RwLock` guards the storage; `lookup` takes a read guard only
/// long enough to copy out the `'static` reference.
pub struct StringInterner {
    inner: RwLock<InternInner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(InternInner::with_empty()),
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s) {
                return Ok(Name::from_raw(idx));
            }
        }

        let mut guard = self.inner.write();

        // Double-check after acquiring the write lock
        if let Some(&idx) = guard.map.get(s) {
            return Ok(Name::from_raw(idx));
        }

        let idx = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow)?;

        // Leak only after the duplicate check, so each distinct string is
        // leaked at most once.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);

        Ok(Name::from_raw(idx))
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics on interner overflow. Use [`try_intern`](Self::try_intern) for
    /// fallible interning.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a `Name`.
    ///
    /// # Panics
    /// Panics if the `Name` was not created by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
