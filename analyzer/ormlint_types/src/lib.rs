//! Type representation for the analyzed language.
//!
//! Return-type extensions refine judgments the host analyzer would otherwise
//! make less precisely, so everything in this crate represents the *analyzed*
//! language's types (objects, arrays, unions, class templates), not Rust
//! types.
//!
//! Two invariants drive the design:
//! - Types are interned: `TyId` is a u32 handle with O(1) equality, and
//!   identical types always receive the same handle.
//! - Unions are canonical: members are sorted, deduplicated, and flat, so a
//!   union built twice from the same parts is the same `TyId`.
//!
//! Use [`TyInterner`] to intern types, [`combine`] to build and narrow
//! unions, and [`TyFolder`]/[`TyVisitor`] for structural traversal.

pub mod combine;
mod data;
mod display;
mod flags;
mod interner;
mod name;
mod pool;
mod traverse;

pub use data::{TyData, TyId};
pub use display::TyDisplay;
pub use flags::TyFlags;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use pool::{TyInternError, TyInterner};
pub use traverse::{TyFolder, TyVisitor};
