//! Dynamic return-type extensions for ORM query builders.
//!
//! The host analyzer resolves a method call, infers the argument types from
//! the surrounding scope, and asks the [`ExtensionRegistry`] whether any
//! registered [`MethodReturnTypeExtension`] wants to refine the declared
//! return type. Extensions have no control flow of their own: they are
//! queried once per call site, borrow every descriptor they see, and answer
//! `None` when they have no opinion.
//!
//! The one extension shipped here, [`BuilderFindReturnTypeExtension`],
//! narrows the "find"-family methods of the ORM query builder: a scalar key
//! cannot produce a collection, an iterable of keys cannot produce a bare
//! model, and an unknown argument shape leaves the declared union alone.

mod api;
mod call;
mod ctx;
mod find;
pub mod model;
mod registry;
pub mod shape;

pub use api::MethodReturnTypeExtension;
pub use call::{AnalysisScope, Arg, ExprId, MethodCall, Scope};
pub use ctx::AnalysisCtx;
pub use find::BuilderFindReturnTypeExtension;
pub use registry::ExtensionRegistry;
