//! Template parameter bindings of a generic class.

use ormlint_types::{Name, TyId};

/// Ordered template parameter bindings.
///
/// A generic class declares its parameters with placeholder bindings
/// (`TModel` → `Template(TModel)`); an instantiation rebinds them to
/// concrete types. Lookup is a linear scan, template lists are tiny.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateMap {
    bindings: Vec<(Name, TyId)>,
}

impl TemplateMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a template parameter, or `None` if the class does not
    /// declare it.
    pub fn get(&self, name: Name) -> Option<TyId> {
        self.bindings
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, ty)| ty)
    }

    /// Check whether the parameter is declared.
    pub fn declares(&self, name: Name) -> bool {
        self.bindings.iter().any(|(n, _)| *n == name)
    }

    /// Bind a parameter, replacing any existing binding of the same name.
    pub fn bind(&mut self, name: Name, ty: TyId) {
        if let Some(slot) = self.bindings.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = ty;
        } else {
            self.bindings.push((name, ty));
        }
    }

    /// Check if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, TyId)> + '_ {
        self.bindings.iter().copied()
    }
}
