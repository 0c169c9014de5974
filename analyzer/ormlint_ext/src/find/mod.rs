//! Dynamic return type for the builder's "find" family.
//!
//! The ORM declares `find`-style methods with a deliberately wide return
//! type: a single key produces a model or null, an iterable of keys produces
//! a collection, and the declared signature has to cover both. This
//! extension narrows the declared union per call site from the shape of the
//! first argument.

use ormlint_reflect::MethodLookup;
use ormlint_types::{combine, Name, TyData, TyId};

use crate::shape::{self, ArgShape};
use crate::{model, AnalysisCtx, MethodCall, MethodReturnTypeExtension, Scope};

/// Return-type extension for "find"-family methods on the ORM query builder.
///
/// Applies when the method name starts with `find`, the receiver's active
/// template map binds the model parameter to a concrete class, and the
/// method is native to the builder or the low-level query builder.
pub struct BuilderFindReturnTypeExtension {
    builder_class: &'static str,
    query_builder_class: &'static str,
    collection_class: &'static str,
    model_template: &'static str,
}

impl BuilderFindReturnTypeExtension {
    /// Create the extension for the canonical ORM class names.
    pub fn new() -> Self {
        Self {
            builder_class: "Builder",
            query_builder_class: "QueryBuilder",
            collection_class: "Collection",
            model_template: "TModel",
        }
    }

    /// The model class the receiver is bound to, if the binding resolved to
    /// a concrete object type.
    fn bound_model(&self, ctx: &AnalysisCtx<'_>, lookup: &MethodLookup<'_>) -> Option<Name> {
        let template = ctx.strings.intern(self.model_template);
        let bound = lookup.class.templates().get(template)?;
        match ctx.types.lookup(bound) {
            TyData::Object(name) => Some(name),
            _ => None,
        }
    }
}

impl Default for BuilderFindReturnTypeExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodReturnTypeExtension for BuilderFindReturnTypeExtension {
    fn class_name(&self) -> &str {
        self.builder_class
    }

    fn supports_method(&self, ctx: &AnalysisCtx<'_>, lookup: &MethodLookup<'_>) -> bool {
        let method = lookup.method.name();
        if !ctx.strings.lookup(method).starts_with("find") {
            return false;
        }

        if self.bound_model(ctx, lookup).is_none() {
            return false;
        }

        let builder = ctx.strings.intern(self.builder_class);
        let query_builder = ctx.strings.intern(self.query_builder_class);
        ctx.reflect.has_native_method(builder, method)
            || ctx.reflect.has_native_method(query_builder, method)
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(method = ctx.strings.lookup(lookup.method.name()))
    )]
    fn return_type(
        &self,
        ctx: &AnalysisCtx<'_>,
        lookup: &MethodLookup<'_>,
        call: &MethodCall,
        scope: &dyn Scope,
    ) -> Option<TyId> {
        // Without an argument there is nothing to narrow by.
        let first = call.args().first()?;

        let model = self.bound_model(ctx, lookup)?;
        let resolved = model::resolve_declared_return(ctx, lookup, model)?;

        let arg_ty = scope.ty_of(first.expr);
        let model_obj = ctx.types.object(model);
        let collection = ctx.strings.intern(self.collection_class);

        let narrowed = match shape::classify(ctx, arg_ty) {
            // A collection of keys: the call cannot produce a bare model.
            ArgShape::Iterable => {
                if model::references_class(ctx, resolved, collection) {
                    model::collection_for_model(ctx, collection, model)
                } else {
                    combine::remove(ctx.types, resolved, model_obj)
                }
            }
            // The host knows nothing about the argument: keep the union.
            ArgShape::Unknown => resolved,
            // A single key: the call cannot produce a collection.
            ArgShape::Scalar => {
                let without_arrays = combine::remove(
                    ctx.types,
                    resolved,
                    ctx.types.array(TyId::MIXED, model_obj),
                );
                combine::remove(ctx.types, without_arrays, ctx.types.object(collection))
            }
        };

        tracing::debug!(
            narrowed = %ctx.types.display(narrowed, ctx.strings),
            "narrowed find return type"
        );
        Some(narrowed)
    }
}

#[cfg(test)]
mod tests;
