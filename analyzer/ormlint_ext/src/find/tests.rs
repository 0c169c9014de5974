use pretty_assertions::assert_eq;

use ormlint_reflect::{stubs, ClassReflection, ReflectionProvider};
use ormlint_types::{combine, Name, StringInterner, TyId, TyInterner};

use super::*;
use crate::{AnalysisScope, Arg, ExprId, ExtensionRegistry};

struct Fixture {
    pool: TyInterner,
    strings: StringInterner,
    provider: ReflectionProvider,
    classes: stubs::OrmClasses,
    user: Name,
}

fn fixture() -> Fixture {
    let pool = TyInterner::new();
    let strings = StringInterner::new();
    let mut provider = ReflectionProvider::new();
    let classes = stubs::register_orm_classes(&mut provider, &pool, &strings);

    let user = strings.intern("User");
    stubs::register_model(&mut provider, &classes, user, None);

    Fixture {
        pool,
        strings,
        provider,
        classes,
        user,
    }
}

impl Fixture {
    fn user_builder(&self) -> ClassReflection {
        self.provider
            .instantiate(
                self.classes.builder,
                &[(self.classes.t_model, self.pool.object(self.user))],
            )
            .unwrap()
    }

    /// A one-argument call with the argument's inferred type recorded.
    fn call_with_arg(&self, method: &str, arg_ty: TyId) -> (MethodCall, AnalysisScope) {
        let expr = ExprId::from_raw(1);
        let mut scope = AnalysisScope::new();
        scope.set(expr, arg_ty);
        (
            MethodCall::new(self.strings.intern(method), vec![Arg::new(expr)]),
            scope,
        )
    }

    fn resolve(&self, method: &str, arg_ty: TyId) -> Option<TyId> {
        let builder = self.user_builder();
        let lookup = self
            .provider
            .method_lookup(&builder, self.strings.intern(method))
            .unwrap();
        let (call, scope) = self.call_with_arg(method, arg_ty);
        let ctx = AnalysisCtx::new(&self.pool, &self.strings, &self.provider);
        BuilderFindReturnTypeExtension::new().return_type(&ctx, &lookup, &call, &scope)
    }

    fn user_obj(&self) -> TyId {
        self.pool.object(self.user)
    }

    fn user_collection(&self) -> TyId {
        self.pool
            .generic(self.classes.collection, [TyId::INT, self.user_obj()])
    }
}

#[test]
fn test_find_with_scalar_key_drops_collection() {
    let f = fixture();
    let expected = combine::union(&f.pool, [f.user_obj(), TyId::NULL]);
    assert_eq!(f.resolve("find", TyId::INT), Some(expected));
    assert_eq!(f.resolve("find", TyId::STR), Some(expected));
}

#[test]
fn test_find_with_iterable_keys_answers_collection() {
    let f = fixture();
    let keys = f.pool.array(TyId::INT, TyId::INT);
    assert_eq!(f.resolve("find", keys), Some(f.user_collection()));
}

#[test]
fn test_find_with_collection_argument_answers_collection() {
    let f = fixture();
    // Class-based iterability: a collection of keys, not an array.
    let keys = f.pool.object(f.classes.collection);
    assert_eq!(f.resolve("find", keys), Some(f.user_collection()));
}

#[test]
fn test_find_with_unknown_argument_keeps_declared_union() {
    let f = fixture();
    let expected = combine::union(
        &f.pool,
        [f.user_obj(), f.user_collection(), TyId::NULL],
    );
    assert_eq!(f.resolve("find", TyId::MIXED), Some(expected));
}

#[test]
fn test_find_many_answers_collection_for_iterable() {
    let f = fixture();
    let keys = f.pool.array(TyId::INT, TyId::INT);
    assert_eq!(f.resolve("findMany", keys), Some(f.user_collection()));
}

#[test]
fn test_find_or_fail_with_scalar_key_is_bare_model() {
    let f = fixture();
    assert_eq!(f.resolve("findOrFail", TyId::INT), Some(f.user_obj()));
}

#[test]
fn test_find_or_new_resolves_static_to_model() {
    let f = fixture();
    assert_eq!(f.resolve("findOrNew", TyId::INT), Some(f.user_obj()));
}

#[test]
fn test_custom_collection_class_wins() {
    let mut f = fixture();
    let post = f.strings.intern("Post");
    let post_collection = f.strings.intern("PostCollection");
    stubs::register_model(&mut f.provider, &f.classes, post, Some(post_collection));

    let builder = f
        .provider
        .instantiate(f.classes.builder, &[(f.classes.t_model, f.pool.object(post))])
        .unwrap();
    let lookup = f
        .provider
        .method_lookup(&builder, f.strings.intern("findMany"))
        .unwrap();
    let (call, scope) = f.call_with_arg("findMany", f.pool.array(TyId::INT, TyId::INT));
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);

    let refined =
        BuilderFindReturnTypeExtension::new().return_type(&ctx, &lookup, &call, &scope);
    assert_eq!(refined, Some(f.pool.object(post_collection)));
}

#[test]
fn test_zero_argument_call_has_no_opinion() {
    let f = fixture();
    let builder = f.user_builder();
    let lookup = f
        .provider
        .method_lookup(&builder, f.strings.intern("find"))
        .unwrap();
    let call = MethodCall::new(f.strings.intern("find"), Vec::new());
    let scope = AnalysisScope::new();
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);

    assert_eq!(
        BuilderFindReturnTypeExtension::new().return_type(&ctx, &lookup, &call, &scope),
        None
    );
}

#[test]
fn test_non_find_method_is_unsupported() {
    let f = fixture();
    let builder = f.user_builder();
    // A non-find lookup on the same receiver.
    let where_name = f.strings.intern("where");
    let synthetic = ormlint_reflect::MethodReflection::new(where_name, f.classes.builder);
    let lookup = ormlint_reflect::MethodLookup {
        class: &builder,
        method: &synthetic,
    };
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);

    assert!(!BuilderFindReturnTypeExtension::new().supports_method(&ctx, &lookup));
}

#[test]
fn test_find_prefix_without_native_method_is_unsupported() {
    let f = fixture();
    let builder = f.user_builder();
    // `find`-prefixed, but native to neither builder class.
    let name = f.strings.intern("findSomething");
    let synthetic = ormlint_reflect::MethodReflection::new(name, f.classes.builder);
    let lookup = ormlint_reflect::MethodLookup {
        class: &builder,
        method: &synthetic,
    };
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);

    assert!(!BuilderFindReturnTypeExtension::new().supports_method(&ctx, &lookup));
}

#[test]
fn test_unbound_model_template_is_unsupported() {
    let f = fixture();
    // The registered class still carries its placeholder binding.
    let unbound = f.provider.get_class(f.classes.builder).unwrap();
    let lookup = f
        .provider
        .method_lookup(unbound, f.strings.intern("find"))
        .unwrap();
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);

    assert!(!BuilderFindReturnTypeExtension::new().supports_method(&ctx, &lookup));
}

#[test]
fn test_supported_find_methods() {
    let f = fixture();
    let builder = f.user_builder();
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);
    let extension = BuilderFindReturnTypeExtension::new();

    for method in ["find", "findMany", "findOrFail", "findOrNew", "findOr"] {
        let lookup = f
            .provider
            .method_lookup(&builder, f.strings.intern(method))
            .unwrap();
        assert!(
            extension.supports_method(&ctx, &lookup),
            "{method} should be supported"
        );
    }
}

#[test]
fn test_registry_end_to_end() {
    let f = fixture();
    let mut registry = ExtensionRegistry::new();
    registry.register(Box::new(BuilderFindReturnTypeExtension::new()));

    let builder = f.user_builder();
    let lookup = f
        .provider
        .method_lookup(&builder, f.strings.intern("find"))
        .unwrap();
    let (call, scope) = f.call_with_arg("find", TyId::INT);
    let ctx = AnalysisCtx::new(&f.pool, &f.strings, &f.provider);

    let refined = registry.resolve_return_type(&ctx, &lookup, &call, &scope);
    let expected = combine::union(&f.pool, [f.user_obj(), TyId::NULL]);
    assert_eq!(refined, Some(expected));
}
