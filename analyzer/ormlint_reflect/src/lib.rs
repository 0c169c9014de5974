//! Class and method reflection for the analyzed language.
//!
//! The host analyzer owns these descriptors; extensions borrow them for the
//! duration of a single query and never retain them. The
//! [`ReflectionProvider`] is the registry the host fills before analysis:
//! the ORM surface from [`stubs`], plus the model classes of the codebase
//! under analysis.
//!
//! A generic class is registered once with placeholder template bindings;
//! [`ReflectionProvider::instantiate`] produces the call-site view with the
//! template map bound to concrete types (the "active" template map).

mod class;
mod method;
mod provider;
pub mod stubs;
mod template;

pub use class::ClassReflection;
pub use method::{FunctionVariant, MethodReflection, Param};
pub use provider::{MethodLookup, ReflectError, ReflectionProvider};
pub use template::TemplateMap;
