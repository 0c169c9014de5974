//! Type traversal traits.
//!
//! `TyFolder` rebuilds a type bottom-up through the interner, dispatching to
//! overridable `fold_*` methods per variant; the identity fold returns the
//! input id unchanged thanks to interning. `TyVisitor` walks a type without
//! modification, surfacing the class names and template placeholders it
//! references.

use crate::{combine, Name, TyData, TyId, TyInterner};

/// Trait for transforming types via structural recursion.
///
/// Override specific `fold_*` methods to customize behavior for particular
/// variants; the default `fold` dispatches and rebuilds compounds from
/// folded children. Because types are interned, an override-free fold is
/// the identity.
pub trait TyFolder {
    /// The interner folded types are built in.
    fn pool(&self) -> &TyInterner;

    /// Fold a type by dispatching to variant-specific methods.
    fn fold(&mut self, id: TyId) -> TyId {
        match self.pool().lookup(id) {
            TyData::Mixed
            | TyData::Never
            | TyData::Null
            | TyData::Bool
            | TyData::Int
            | TyData::Float
            | TyData::Str => id,
            TyData::Static => self.fold_static(),
            TyData::Template(name) => self.fold_template(name),
            TyData::Object(name) => self.fold_object(name),
            TyData::Generic { name, args } => self.fold_generic(name, &args),
            TyData::Array { key, value } => {
                let key = self.fold(key);
                let value = self.fold(value);
                self.pool().array(key, value)
            }
            TyData::Iterable { key, value } => {
                let key = self.fold(key);
                let value = self.fold(value);
                self.pool().iterable(key, value)
            }
            TyData::Union(members) => {
                let folded: Vec<TyId> = members.iter().map(|&m| self.fold(m)).collect();
                // Re-canonicalize: folding can merge members.
                combine::union(self.pool(), folded)
            }
        }
    }

    /// Fold the late-static-binding placeholder.
    fn fold_static(&mut self) -> TyId {
        TyId::STATIC
    }

    /// Fold a template placeholder.
    fn fold_template(&mut self, name: Name) -> TyId {
        self.pool().template(name)
    }

    /// Fold an object type.
    fn fold_object(&mut self, name: Name) -> TyId {
        self.pool().object(name)
    }

    /// Fold an applied generic type. Default folds the arguments.
    fn fold_generic(&mut self, name: Name, args: &[TyId]) -> TyId {
        let folded: Vec<TyId> = args.iter().map(|&a| self.fold(a)).collect();
        self.pool().generic(name, folded)
    }
}

/// Trait for visiting types without modification.
///
/// Override `visit_class` / `visit_template` to collect information; the
/// default `visit` recurses structurally.
pub trait TyVisitor {
    /// The interner visited ids belong to.
    fn pool(&self) -> &TyInterner;

    /// Visit a type by dispatching to variant-specific methods.
    fn visit(&mut self, id: TyId) {
        match self.pool().lookup(id) {
            TyData::Object(name) => self.visit_class(name),
            TyData::Generic { name, args } => {
                self.visit_class(name);
                for &arg in args.iter() {
                    self.visit(arg);
                }
            }
            TyData::Array { key, value } | TyData::Iterable { key, value } => {
                self.visit(key);
                self.visit(value);
            }
            TyData::Union(members) => {
                for &member in members.iter() {
                    self.visit(member);
                }
            }
            TyData::Template(name) => self.visit_template(name),
            TyData::Mixed
            | TyData::Never
            | TyData::Null
            | TyData::Bool
            | TyData::Int
            | TyData::Float
            | TyData::Str
            | TyData::Static => {}
        }
    }

    /// Called for every referenced class name (objects and generics).
    fn visit_class(&mut self, _name: Name) {}

    /// Called for every template placeholder.
    fn visit_template(&mut self, _name: Name) {}
}
