//! Union construction and narrowing.
//!
//! [`union`] is the only way unions should be built: it flattens, sorts,
//! and deduplicates members, so the canonical-union invariant on
//! [`TyData::Union`] holds by construction. [`remove`] narrows a type by
//! dropping the union members an argument shape rules out.

use smallvec::SmallVec;

use crate::{TyData, TyId, TyInterner};

/// Build the canonical union of `members`.
///
/// Nested unions are flattened, duplicates collapse to one member, `Never`
/// members are dropped, and any `Mixed` member absorbs the whole union.
/// Zero members yield `NEVER`; a single member yields itself.
pub fn union(pool: &TyInterner, members: impl IntoIterator<Item = TyId>) -> TyId {
    let mut flat: SmallVec<[TyId; 8]> = SmallVec::new();

    for id in members {
        match pool.lookup(id) {
            TyData::Mixed => return TyId::MIXED,
            TyData::Never => {}
            // Union members are flat by invariant, one level is enough.
            TyData::Union(inner) => flat.extend(inner.iter().copied()),
            _ => flat.push(id),
        }
    }

    flat.sort_unstable();
    flat.dedup();

    match flat.len() {
        0 => TyId::NEVER,
        1 => flat[0],
        _ => pool.intern(TyData::Union(flat.as_slice().into())),
    }
}

/// Remove from `from` every alternative subsumed by `target`.
///
/// A union loses the members [`subsumes`] rules out; a non-union either
/// survives unchanged or collapses to `NEVER`. A union `target` is removed
/// member by member. Returns `from` itself when nothing matched.
pub fn remove(pool: &TyInterner, from: TyId, target: TyId) -> TyId {
    if let TyData::Union(targets) = pool.lookup(target) {
        return targets
            .iter()
            .fold(from, |acc, &t| remove(pool, acc, t));
    }

    let members: SmallVec<[TyId; 8]> = match pool.lookup(from) {
        TyData::Union(members) => members.iter().copied().collect(),
        _ => {
            return if subsumes(pool, target, from) {
                TyId::NEVER
            } else {
                from
            };
        }
    };

    let kept: SmallVec<[TyId; 8]> = members
        .iter()
        .copied()
        .filter(|&m| !subsumes(pool, target, m))
        .collect();

    if kept.len() == members.len() {
        return from;
    }
    union(pool, kept)
}

/// Check whether `target` subsumes `member` for the purposes of [`remove`].
///
/// Deliberately structural, not a full subtyping judgment:
/// - identical ids;
/// - an array target with a `mixed` key covers arrays of any key with the
///   same value type;
/// - an iterable target with a `mixed` key covers arrays and iterables with
///   the same value type;
/// - a bare object target covers the object itself and any applied generic
///   of the same class.
pub fn subsumes(pool: &TyInterner, target: TyId, member: TyId) -> bool {
    if member == target {
        return true;
    }

    match (pool.lookup(member), pool.lookup(target)) {
        (
            TyData::Array { value: mv, .. },
            TyData::Array {
                key: tk,
                value: tv,
            },
        ) => tk == TyId::MIXED && mv == tv,
        (
            TyData::Array { value: mv, .. } | TyData::Iterable { value: mv, .. },
            TyData::Iterable {
                key: tk,
                value: tv,
            },
        ) => tk == TyId::MIXED && mv == tv,
        (TyData::Generic { name, .. }, TyData::Object(target_class)) => name == target_class,
        _ => false,
    }
}
