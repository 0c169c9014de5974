//! The host's extension-resolution mechanism.
//!
//! Extensions are registered once at startup; per analyzed call the host
//! asks [`ExtensionRegistry::resolve_return_type`] for the first registered
//! extension that (a) targets the receiver class or one of its ancestors,
//! (b) supports the resolved method, and (c) has an opinion about the call.

use ormlint_reflect::MethodLookup;
use ormlint_types::TyId;

use crate::{AnalysisCtx, MethodCall, MethodReturnTypeExtension, Scope};

/// Registry of dynamic return-type extensions.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn MethodReturnTypeExtension>>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension. Consultation order is registration order.
    pub fn register(&mut self, extension: Box<dyn MethodReturnTypeExtension>) {
        self.extensions.push(extension);
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if no extensions are registered.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Ask registered extensions to refine the return type of `call`.
    ///
    /// Returns the first refinement, or `None` when every applicable
    /// extension declines.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn resolve_return_type(
        &self,
        ctx: &AnalysisCtx<'_>,
        lookup: &MethodLookup<'_>,
        call: &MethodCall,
        scope: &dyn Scope,
    ) -> Option<TyId> {
        let receiver = lookup.class.name();

        for extension in &self.extensions {
            let target = ctx.strings.intern(extension.class_name());
            if !ctx.reflect.is_subclass_of(receiver, target) {
                continue;
            }
            if !extension.supports_method(ctx, lookup) {
                continue;
            }
            if let Some(refined) = extension.return_type(ctx, lookup, call, scope) {
                tracing::debug!(
                    extension = extension.class_name(),
                    "extension refined return type"
                );
                return Some(refined);
            }
        }
        None
    }
}
