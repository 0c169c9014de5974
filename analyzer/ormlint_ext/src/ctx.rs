//! Per-query analysis context.

use ormlint_reflect::ReflectionProvider;
use ormlint_types::{StringInterner, TyInterner};

/// Everything an extension may consult while answering one query.
///
/// Borrowed for the duration of a single call and never retained; the host
/// owns all three components.
#[derive(Clone, Copy)]
pub struct AnalysisCtx<'a> {
    /// Type interner for the analyzed program.
    pub types: &'a TyInterner,
    /// Identifier interner for the analyzed program.
    pub strings: &'a StringInterner,
    /// Class registry.
    pub reflect: &'a ReflectionProvider,
}

impl<'a> AnalysisCtx<'a> {
    /// Bundle the host's interners and registry for one query.
    pub fn new(
        types: &'a TyInterner,
        strings: &'a StringInterner,
        reflect: &'a ReflectionProvider,
    ) -> Self {
        Self {
            types,
            strings,
            reflect,
        }
    }
}
