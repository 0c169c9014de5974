//! The ORM surface the extensions recognize.
//!
//! Registers the query-builder, collection, and model base classes with the
//! signatures the analyzed ORM declares for its "find" family. Declared
//! return types use `Static` and the `TModel` template placeholder; the
//! extension substitutes the bound model at each call site.

use ormlint_types::{combine, Name, StringInterner, TyId, TyInterner};

use crate::{ClassReflection, FunctionVariant, MethodReflection, Param, ReflectionProvider};

/// Interned names of the registered ORM classes.
#[derive(Clone, Copy, Debug)]
pub struct OrmClasses {
    /// The ORM query builder, generic over the bound model.
    pub builder: Name,
    /// The lower-level query builder.
    pub query_builder: Name,
    /// The generic model collection class.
    pub collection: Name,
    /// The model base class.
    pub model: Name,
    /// The builder's model template parameter.
    pub t_model: Name,
}

/// Register the ORM classes and return their interned names.
pub fn register_orm_classes(
    provider: &mut ReflectionProvider,
    pool: &TyInterner,
    strings: &StringInterner,
) -> OrmClasses {
    let classes = OrmClasses {
        builder: strings.intern("Builder"),
        query_builder: strings.intern("QueryBuilder"),
        collection: strings.intern("Collection"),
        model: strings.intern("Model"),
        t_model: strings.intern("TModel"),
    };

    let t_model = pool.template(classes.t_model);
    let model_collection = pool.generic(classes.collection, [TyId::INT, t_model]);
    let columns = Param::new(strings.intern("columns"), pool.array(TyId::INT, TyId::STR));
    let id = Param::new(strings.intern("id"), TyId::MIXED);

    let find_return = combine::union(pool, [t_model, model_collection, TyId::NULL]);
    let find_or_fail_return = combine::union(pool, [t_model, model_collection]);

    provider.register(
        ClassReflection::new(classes.builder)
            .with_template(classes.t_model, t_model)
            .with_method(finder(strings, "find", classes.builder, &[&id, &columns], find_return))
            .with_method(finder(
                strings,
                "findMany",
                classes.builder,
                &[&id, &columns],
                model_collection,
            ))
            .with_method(finder(
                strings,
                "findOrFail",
                classes.builder,
                &[&id, &columns],
                find_or_fail_return,
            ))
            .with_method(finder(
                strings,
                "findOrNew",
                classes.builder,
                &[&id, &columns],
                TyId::STATIC,
            ))
            .with_method(finder(
                strings,
                "findOr",
                classes.builder,
                &[&id],
                find_return,
            )),
    );

    // The low-level builder has no model binding; only its method-name
    // surface participates in applicability checks.
    provider.register(
        ClassReflection::new(classes.query_builder)
            .with_method(finder(
                strings,
                "find",
                classes.query_builder,
                &[&id, &columns],
                TyId::MIXED,
            ))
            .with_method(finder(
                strings,
                "findOr",
                classes.query_builder,
                &[&id],
                TyId::MIXED,
            )),
    );

    provider.register(ClassReflection::new(classes.collection).iterable());
    provider.register(ClassReflection::new(classes.model));

    classes
}

/// Register a model class of the analyzed codebase.
///
/// `collection` overrides the generic collection type for queries against
/// this model.
pub fn register_model(
    provider: &mut ReflectionProvider,
    classes: &OrmClasses,
    name: Name,
    collection: Option<Name>,
) {
    let mut class = ClassReflection::new(name).with_parent(classes.model);
    if let Some(collection) = collection {
        class = class.with_collection_class(collection);
    }
    provider.register(class);
}

fn finder(
    strings: &StringInterner,
    name: &str,
    declaring_class: Name,
    params: &[&Param],
    return_ty: TyId,
) -> MethodReflection {
    MethodReflection::new(strings.intern(name), declaring_class).with_variant(
        FunctionVariant::new(params.iter().map(|&p| p.clone()).collect(), return_ty),
    )
}
