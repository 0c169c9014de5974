//! Argument-shape classification.
//!
//! The find-family narrowing is a decision table over the shape of the first
//! argument: a collection of keys, a single key, or something the host could
//! not pin down.

use ormlint_types::{TyData, TyId};

use crate::AnalysisCtx;

/// Shape of an argument type, as the narrowing decision table sees it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ArgShape {
    /// Arrays, structural iterables, and instances of iterable classes.
    Iterable,
    /// The host inferred `mixed`: no narrowing is safe.
    Unknown,
    /// Anything else: a key-like value.
    Scalar,
}

/// Classify `ty` for the narrowing decision table.
///
/// A union is iterable only when every member is; a single non-iterable
/// member means a bare key may flow through at runtime.
pub fn classify(ctx: &AnalysisCtx<'_>, ty: TyId) -> ArgShape {
    if ty == TyId::MIXED {
        return ArgShape::Unknown;
    }
    if is_iterable(ctx, ty) {
        ArgShape::Iterable
    } else {
        ArgShape::Scalar
    }
}

fn is_iterable(ctx: &AnalysisCtx<'_>, ty: TyId) -> bool {
    if ctx.types.flags(ty).is_iterable() {
        return true;
    }
    match ctx.types.lookup(ty) {
        // Class-based iterability comes from reflection, not structure.
        TyData::Object(name) | TyData::Generic { name, .. } => {
            ctx.reflect.is_iterable_class(name)
        }
        TyData::Union(members) => members.iter().all(|&m| is_iterable(ctx, m)),
        _ => false,
    }
}
