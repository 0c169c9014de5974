//! Call-site descriptors and the scope contract.
//!
//! The host analyzer owns the expression tree; extensions only see opaque
//! expression handles and ask the scope what type it inferred for them.

use rustc_hash::FxHashMap;

use ormlint_types::{Name, TyId};

/// Opaque handle to an argument expression in the host's tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create from a raw u32 value.
    pub const fn from_raw(raw: u32) -> Self {
        ExprId(raw)
    }

    /// Get the raw u32 value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One argument at a call site.
#[derive(Copy, Clone, Debug)]
pub struct Arg {
    /// The argument expression.
    pub expr: ExprId,
}

impl Arg {
    /// Create an argument descriptor.
    pub fn new(expr: ExprId) -> Self {
        Self { expr }
    }
}

/// A method call being analyzed.
#[derive(Clone, Debug)]
pub struct MethodCall {
    method: Name,
    args: Vec<Arg>,
}

impl MethodCall {
    /// Create a call descriptor.
    pub fn new(method: Name, args: Vec<Arg>) -> Self {
        Self { method, args }
    }

    /// Called method name.
    pub fn method(&self) -> Name {
        self.method
    }

    /// Arguments in call order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

/// The host's view of the analysis scope around a call site.
///
/// Extensions use this to ask what type the host inferred for an argument
/// expression.
pub trait Scope {
    /// The inferred type of `expr`. Unknown expressions are `mixed`.
    fn ty_of(&self, expr: ExprId) -> TyId;
}

/// Map-backed [`Scope`] implementation.
#[derive(Debug, Default)]
pub struct AnalysisScope {
    types: FxHashMap<ExprId, TyId>,
}

impl AnalysisScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the inferred type of an expression.
    pub fn set(&mut self, expr: ExprId, ty: TyId) {
        self.types.insert(expr, ty);
    }
}

impl Scope for AnalysisScope {
    fn ty_of(&self, expr: ExprId) -> TyId {
        self.types.get(&expr).copied().unwrap_or(TyId::MIXED)
    }
}
