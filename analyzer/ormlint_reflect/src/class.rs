//! Class reflection descriptors.

use rustc_hash::FxHashMap;

use ormlint_types::{Name, TyId};

use crate::{MethodReflection, TemplateMap};

/// Reflection of a single class.
///
/// Built once at registration time with the `with_*` builders, then read-only
/// for the rest of the analysis run. Template bindings start as placeholders
/// on the registered (generic) class;
/// [`ReflectionProvider::instantiate`](crate::ReflectionProvider::instantiate)
/// produces the bound call-site view.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassReflection {
    name: Name,
    parent: Option<Name>,
    templates: TemplateMap,
    methods: FxHashMap<Name, MethodReflection>,
    iterable: bool,
    collection_class: Option<Name>,
}

impl ClassReflection {
    /// Create a class reflection with no members.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            parent: None,
            templates: TemplateMap::new(),
            methods: FxHashMap::default(),
            iterable: false,
            collection_class: None,
        }
    }

    /// Set the parent class.
    #[must_use]
    pub fn with_parent(mut self, parent: Name) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare a template parameter with its placeholder binding.
    #[must_use]
    pub fn with_template(mut self, name: Name, placeholder: TyId) -> Self {
        self.templates.bind(name, placeholder);
        self
    }

    /// Declare a native method.
    #[must_use]
    pub fn with_method(mut self, method: MethodReflection) -> Self {
        self.methods.insert(method.name(), method);
        self
    }

    /// Mark instances of this class as iterable.
    #[must_use]
    pub fn iterable(mut self) -> Self {
        self.iterable = true;
        self
    }

    /// Declare the custom collection class this model's queries return.
    #[must_use]
    pub fn with_collection_class(mut self, collection: Name) -> Self {
        self.collection_class = Some(collection);
        self
    }

    /// Class name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// Parent class, if any.
    pub fn parent(&self) -> Option<Name> {
        self.parent
    }

    /// Active template bindings.
    pub fn templates(&self) -> &TemplateMap {
        &self.templates
    }

    /// Mutable template bindings (instantiation only).
    pub(crate) fn templates_mut(&mut self) -> &mut TemplateMap {
        &mut self.templates
    }

    /// A method declared directly on this class.
    pub fn method(&self, name: Name) -> Option<&MethodReflection> {
        self.methods.get(&name)
    }

    /// Check for a method declared directly on this class.
    pub fn has_method(&self, name: Name) -> bool {
        self.methods.contains_key(&name)
    }

    /// Whether instances are iterable (declared, not inherited — use
    /// [`ReflectionProvider::is_iterable_class`](crate::ReflectionProvider::is_iterable_class)
    /// for the inherited view).
    pub fn is_iterable(&self) -> bool {
        self.iterable
    }

    /// Custom collection class for this model, if declared.
    pub fn collection_class(&self) -> Option<Name> {
        self.collection_class
    }
}
