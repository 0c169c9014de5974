//! The extension contract the host invokes.

use ormlint_reflect::MethodLookup;
use ormlint_types::TyId;

use crate::{AnalysisCtx, MethodCall, Scope};

/// A dynamic return-type extension.
///
/// The host asks, per analyzed method call: does this extension apply to the
/// receiver class ([`class_name`](Self::class_name)), does it care about the
/// resolved method ([`supports_method`](Self::supports_method)), and if so,
/// what narrower type does the call produce
/// ([`return_type`](Self::return_type))?
///
/// Returning `None` means "no opinion" and lets the host fall back to the
/// declared return type; it is not an error (inapplicability is never a
/// fault).
pub trait MethodReturnTypeExtension {
    /// The class this extension augments. The host consults the extension
    /// for receivers of this class and its subclasses.
    fn class_name(&self) -> &str;

    /// Whether this extension wants to handle the resolved method.
    fn supports_method(&self, ctx: &AnalysisCtx<'_>, lookup: &MethodLookup<'_>) -> bool;

    /// The refined return type of the call, or `None` for no opinion.
    fn return_type(
        &self,
        ctx: &AnalysisCtx<'_>,
        lookup: &MethodLookup<'_>,
        call: &MethodCall,
        scope: &dyn Scope,
    ) -> Option<TyId>;
}
