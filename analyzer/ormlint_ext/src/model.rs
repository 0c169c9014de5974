//! Model-type helpers.
//!
//! Declared builder signatures are written against `static` and the model
//! template parameter; these helpers substitute the call site's bound model
//! and answer which collection type its queries produce.

use ormlint_reflect::{ClassReflection, MethodLookup, TemplateMap};
use ormlint_types::{Name, TyFolder, TyId, TyInterner, TyVisitor};

use crate::AnalysisCtx;

/// Folder substituting `static` and declared template placeholders with the
/// bound model type.
struct ReplaceWithModel<'a> {
    pool: &'a TyInterner,
    templates: &'a TemplateMap,
    model: Name,
}

impl TyFolder for ReplaceWithModel<'_> {
    fn pool(&self) -> &TyInterner {
        self.pool
    }

    fn fold_static(&mut self) -> TyId {
        self.pool.object(self.model)
    }

    fn fold_template(&mut self, name: Name) -> TyId {
        // Bindings are concrete types or the placeholder itself; either way
        // a single lookup terminates.
        self.templates
            .get(name)
            .unwrap_or_else(|| self.pool.template(name))
    }
}

/// Resolve the canonical declared return type of the looked-up method for
/// the given bound model.
///
/// `None` when the method declares no signature.
pub fn resolve_declared_return(
    ctx: &AnalysisCtx<'_>,
    lookup: &MethodLookup<'_>,
    model: Name,
) -> Option<TyId> {
    let declared = lookup.method.variant(0)?.return_ty();
    if !ctx.types.flags(declared).needs_subst() {
        return Some(declared);
    }

    let mut folder = ReplaceWithModel {
        pool: ctx.types,
        templates: lookup.class.templates(),
        model,
    };
    Some(folder.fold(declared))
}

/// The collection type queries against `model` produce: the model's custom
/// collection class when declared, else the generic collection of the model.
pub fn collection_for_model(ctx: &AnalysisCtx<'_>, collection_class: Name, model: Name) -> TyId {
    let custom = ctx
        .reflect
        .get_class(model)
        .ok()
        .and_then(ClassReflection::collection_class);

    match custom {
        Some(class) => ctx.types.object(class),
        None => ctx
            .types
            .generic(collection_class, [TyId::INT, ctx.types.object(model)]),
    }
}

/// Whether `ty` references `class` anywhere in its structure.
pub fn references_class(ctx: &AnalysisCtx<'_>, ty: TyId, class: Name) -> bool {
    struct ClassFinder<'a> {
        pool: &'a TyInterner,
        target: Name,
        found: bool,
    }

    impl TyVisitor for ClassFinder<'_> {
        fn pool(&self) -> &TyInterner {
            self.pool
        }

        fn visit_class(&mut self, name: Name) {
            if name == self.target {
                self.found = true;
            }
        }
    }

    let mut finder = ClassFinder {
        pool: ctx.types,
        target: class,
        found: false,
    };
    finder.visit(ty);
    finder.found
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use ormlint_reflect::{stubs, ReflectionProvider};
    use ormlint_types::{combine, StringInterner};

    #[test]
    fn test_template_substitution_resolves_bound_model() {
        let pool = TyInterner::new();
        let strings = StringInterner::new();
        let mut provider = ReflectionProvider::new();
        let classes = stubs::register_orm_classes(&mut provider, &pool, &strings);

        let user = strings.intern("User");
        stubs::register_model(&mut provider, &classes, user, None);
        let user_obj = pool.object(user);

        let builder = provider
            .instantiate(classes.builder, &[(classes.t_model, user_obj)])
            .unwrap();
        let ctx = AnalysisCtx::new(&pool, &strings, &provider);

        let lookup = provider
            .method_lookup(&builder, strings.intern("find"))
            .unwrap();
        let resolved = resolve_declared_return(&ctx, &lookup, user).unwrap();

        let expected = combine::union(
            &pool,
            [
                user_obj,
                pool.generic(classes.collection, [TyId::INT, user_obj]),
                TyId::NULL,
            ],
        );
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_static_substitution() {
        let pool = TyInterner::new();
        let strings = StringInterner::new();
        let mut provider = ReflectionProvider::new();
        let classes = stubs::register_orm_classes(&mut provider, &pool, &strings);

        let user = strings.intern("User");
        stubs::register_model(&mut provider, &classes, user, None);
        let user_obj = pool.object(user);

        let builder = provider
            .instantiate(classes.builder, &[(classes.t_model, user_obj)])
            .unwrap();
        let ctx = AnalysisCtx::new(&pool, &strings, &provider);

        let lookup = provider
            .method_lookup(&builder, strings.intern("findOrNew"))
            .unwrap();
        assert_eq!(
            resolve_declared_return(&ctx, &lookup, user),
            Some(user_obj)
        );
    }

    #[test]
    fn test_collection_for_model_default_and_custom() {
        let pool = TyInterner::new();
        let strings = StringInterner::new();
        let mut provider = ReflectionProvider::new();
        let classes = stubs::register_orm_classes(&mut provider, &pool, &strings);

        let user = strings.intern("User");
        stubs::register_model(&mut provider, &classes, user, None);

        let post = strings.intern("Post");
        let post_collection = strings.intern("PostCollection");
        stubs::register_model(&mut provider, &classes, post, Some(post_collection));

        let ctx = AnalysisCtx::new(&pool, &strings, &provider);

        assert_eq!(
            collection_for_model(&ctx, classes.collection, user),
            pool.generic(classes.collection, [TyId::INT, pool.object(user)])
        );
        assert_eq!(
            collection_for_model(&ctx, classes.collection, post),
            pool.object(post_collection)
        );
    }

    #[test]
    fn test_references_class_sees_generics() {
        let pool = TyInterner::new();
        let strings = StringInterner::new();
        let provider = ReflectionProvider::new();
        let ctx = AnalysisCtx::new(&pool, &strings, &provider);

        let collection = strings.intern("Collection");
        let user = strings.intern("User");
        let user_obj = pool.object(user);

        let ty = combine::union(
            &pool,
            [
                user_obj,
                pool.generic(collection, [TyId::INT, user_obj]),
                TyId::NULL,
            ],
        );

        assert!(references_class(&ctx, ty, collection));
        assert!(references_class(&ctx, ty, user));
        assert!(!references_class(&ctx, ty, strings.intern("Post")));
    }
}
