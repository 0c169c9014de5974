//! Method reflection descriptors.

use ormlint_types::{Name, TyId};

/// Declared parameter of a function variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: Name,
    /// Declared parameter type.
    pub ty: TyId,
}

impl Param {
    /// Create a parameter descriptor.
    pub fn new(name: Name, ty: TyId) -> Self {
        Self { name, ty }
    }
}

/// One declared signature of a method.
///
/// Dynamic-language methods can expose several signatures (overload
/// docblocks); the first variant is the canonical one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionVariant {
    params: Vec<Param>,
    return_ty: TyId,
}

impl FunctionVariant {
    /// Create a variant from its parameters and return type.
    pub fn new(params: Vec<Param>, return_ty: TyId) -> Self {
        Self { params, return_ty }
    }

    /// Declared parameters in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Declared return type. May contain `Static` and template placeholders;
    /// callers substitute them for the call site's bound types.
    pub fn return_ty(&self) -> TyId {
        self.return_ty
    }
}

/// Reflection of a single method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodReflection {
    name: Name,
    declaring_class: Name,
    variants: Vec<FunctionVariant>,
}

impl MethodReflection {
    /// Create a method reflection with no variants.
    pub fn new(name: Name, declaring_class: Name) -> Self {
        Self {
            name,
            declaring_class,
            variants: Vec::new(),
        }
    }

    /// Append a declared signature.
    #[must_use]
    pub fn with_variant(mut self, variant: FunctionVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Method name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// Class the method is declared on.
    pub fn declaring_class(&self) -> Name {
        self.declaring_class
    }

    /// Declared signatures in declaration order.
    pub fn variants(&self) -> &[FunctionVariant] {
        &self.variants
    }

    /// The canonical (first) signature, if any was declared.
    pub fn variant(&self, index: usize) -> Option<&FunctionVariant> {
        self.variants.get(index)
    }
}
