//! Class registry and lookup.

use rustc_hash::FxHashMap;
use thiserror::Error;

use ormlint_types::{Name, TyId};

use crate::{ClassReflection, MethodReflection};

/// Reflection lookup errors.
///
/// These indicate host misuse (querying classes that were never registered),
/// not analysis findings; extension inapplicability is expressed as `None`,
/// never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// The class was never registered.
    #[error("unknown class (name id {})", .0.raw())]
    UnknownClass(Name),
    /// The class does not declare the template parameter.
    #[error("class (name id {}) declares no template parameter (name id {})", .0.raw(), .1.raw())]
    UnknownTemplate(Name, Name),
}

/// A resolved method together with the class reflection it was reached
/// through.
///
/// The class carries the call site's active template map; the method may be
/// declared on the class itself or inherited from an ancestor. Borrowed per
/// query, never retained.
#[derive(Clone, Copy, Debug)]
pub struct MethodLookup<'a> {
    /// The (possibly instantiated) class the lookup started from.
    pub class: &'a ClassReflection,
    /// The resolved method reflection.
    pub method: &'a MethodReflection,
}

/// Registry of every class the analyzer knows about.
#[derive(Debug, Default)]
pub struct ReflectionProvider {
    classes: FxHashMap<Name, ClassReflection>,
}

impl ReflectionProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any previous registration of the same name.
    pub fn register(&mut self, class: ClassReflection) {
        self.classes.insert(class.name(), class);
    }

    /// Look up a registered class.
    pub fn get_class(&self, name: Name) -> Result<&ClassReflection, ReflectError> {
        self.classes
            .get(&name)
            .ok_or(ReflectError::UnknownClass(name))
    }

    /// Check whether a class is registered.
    pub fn has_class(&self, name: Name) -> bool {
        self.classes.contains_key(&name)
    }

    /// Check whether `class` declares `method` natively, on itself or an
    /// ancestor. Unregistered classes have no methods.
    pub fn has_native_method(&self, class: Name, method: Name) -> bool {
        self.ancestry(class)
            .any(|c| c.has_method(method))
    }

    /// Resolve `method` on `class`, walking the parent chain.
    ///
    /// The returned lookup keeps `class` as the receiver even when the
    /// method is inherited, so its active template map stays visible.
    pub fn method_lookup<'a>(
        &'a self,
        class: &'a ClassReflection,
        method: Name,
    ) -> Option<MethodLookup<'a>> {
        if let Some(found) = class.method(method) {
            return Some(MethodLookup {
                class,
                method: found,
            });
        }

        let mut parent = class.parent();
        while let Some(name) = parent {
            let ancestor = self.classes.get(&name)?;
            if let Some(found) = ancestor.method(method) {
                return Some(MethodLookup {
                    class,
                    method: found,
                });
            }
            parent = ancestor.parent();
        }
        None
    }

    /// Whether instances of `class` are iterable, directly or by inheritance.
    pub fn is_iterable_class(&self, class: Name) -> bool {
        self.ancestry(class).any(ClassReflection::is_iterable)
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, class: Name, ancestor: Name) -> bool {
        self.ancestry(class).any(|c| c.name() == ancestor)
    }

    /// Clone `class` with its template parameters bound to concrete types:
    /// the call-site view of a generic instantiation.
    ///
    /// Every bound parameter must be declared on the class.
    pub fn instantiate(
        &self,
        class: Name,
        bindings: &[(Name, TyId)],
    ) -> Result<ClassReflection, ReflectError> {
        let mut instantiated = self.get_class(class)?.clone();
        for &(param, ty) in bindings {
            if !instantiated.templates().declares(param) {
                return Err(ReflectError::UnknownTemplate(class, param));
            }
            instantiated.templates_mut().bind(param, ty);
        }
        Ok(instantiated)
    }

    /// Walk a class and its ancestors. Stops at unregistered parents and
    /// guards against registration cycles.
    fn ancestry(&self, class: Name) -> impl Iterator<Item = &ClassReflection> {
        let mut next = Some(class);
        let mut steps = 0usize;
        std::iter::from_fn(move || {
            // A parent chain deeper than this is a registration cycle.
            const MAX_DEPTH: usize = 64;
            if steps >= MAX_DEPTH {
                return None;
            }
            steps += 1;
            let current = self.classes.get(&next.take()?)?;
            next = current.parent();
            Some(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{FunctionVariant, MethodReflection};
    use ormlint_types::{StringInterner, TyInterner};

    fn provider_with_chain(strings: &StringInterner) -> ReflectionProvider {
        let model = strings.intern("Model");
        let user = strings.intern("User");
        let find = strings.intern("find");

        let mut provider = ReflectionProvider::new();
        provider.register(
            ClassReflection::new(model).with_method(
                MethodReflection::new(find, model)
                    .with_variant(FunctionVariant::new(Vec::new(), TyId::MIXED)),
            ),
        );
        provider.register(ClassReflection::new(user).with_parent(model));
        provider
    }

    #[test]
    fn test_get_class_unknown_is_error() {
        let strings = StringInterner::new();
        let provider = ReflectionProvider::new();
        let ghost = strings.intern("Ghost");
        assert_eq!(
            provider.get_class(ghost),
            Err(ReflectError::UnknownClass(ghost))
        );
    }

    #[test]
    fn test_native_method_walks_parent_chain() {
        let strings = StringInterner::new();
        let provider = provider_with_chain(&strings);
        let user = strings.intern("User");
        let find = strings.intern("find");

        assert!(provider.has_native_method(user, find));
        assert!(!provider.has_native_method(user, strings.intern("findMany")));
    }

    #[test]
    fn test_method_lookup_keeps_receiver_class() {
        let strings = StringInterner::new();
        let provider = provider_with_chain(&strings);
        let user = strings.intern("User");
        let find = strings.intern("find");

        let class = provider.get_class(user).unwrap();
        let lookup = provider.method_lookup(class, find).unwrap();
        assert_eq!(lookup.class.name(), user);
        assert_eq!(lookup.method.declaring_class(), strings.intern("Model"));
    }

    #[test]
    fn test_is_subclass_of() {
        let strings = StringInterner::new();
        let provider = provider_with_chain(&strings);
        let user = strings.intern("User");
        let model = strings.intern("Model");

        assert!(provider.is_subclass_of(user, model));
        assert!(provider.is_subclass_of(user, user));
        assert!(!provider.is_subclass_of(model, user));
    }

    #[test]
    fn test_instantiate_binds_declared_templates() {
        let strings = StringInterner::new();
        let pool = TyInterner::new();
        let builder = strings.intern("Builder");
        let t_model = strings.intern("TModel");
        let user = strings.intern("User");

        let mut provider = ReflectionProvider::new();
        provider.register(
            ClassReflection::new(builder).with_template(t_model, pool.template(t_model)),
        );

        let user_obj = pool.object(user);
        let bound = provider
            .instantiate(builder, &[(t_model, user_obj)])
            .unwrap();
        assert_eq!(bound.templates().get(t_model), Some(user_obj));

        // The registered class keeps its placeholder.
        let registered = provider.get_class(builder).unwrap();
        assert_eq!(
            registered.templates().get(t_model),
            Some(pool.template(t_model))
        );
    }

    #[test]
    fn test_instantiate_rejects_undeclared_template() {
        let strings = StringInterner::new();
        let pool = TyInterner::new();
        let builder = strings.intern("Builder");
        let t_key = strings.intern("TKey");

        let mut provider = ReflectionProvider::new();
        provider.register(ClassReflection::new(builder));

        assert_eq!(
            provider
                .instantiate(builder, &[(t_key, pool.object(t_key))])
                .unwrap_err(),
            ReflectError::UnknownTemplate(builder, t_key)
        );
    }

    #[test]
    fn test_iterable_is_inherited() {
        let strings = StringInterner::new();
        let base = strings.intern("Enumerable");
        let coll = strings.intern("Collection");

        let mut provider = ReflectionProvider::new();
        provider.register(ClassReflection::new(base).iterable());
        provider.register(ClassReflection::new(coll).with_parent(base));

        assert!(provider.is_iterable_class(coll));
        assert!(!provider.is_iterable_class(strings.intern("Model")));
    }
}
