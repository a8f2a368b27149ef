//! Rill type descriptor model
//!
//! This crate defines the canonical in-memory representation of Rill
//! types and the machinery the rest of the compiler and runtime dispatch
//! on:
//! - The closed [`TypeTag`] registry
//! - The arena-backed type graph ([`TypeArena`], [`TypeNode`], [`TypeId`])
//! - Public [`TypeSymbol`] views with lazy, memoized parameter resolution
//! - Canonical signature synthesis
//! - Structural equivalence and assignability

mod compat;
mod error;
mod graph;
mod signature;
mod symbol;
mod tag;

pub use compat::{assignable, equivalent};
pub use error::{TypeModelError, TypeModelResult};
pub use graph::{ModuleId, TypeArena, TypeData, TypeId, TypeList, TypeNode};
pub use symbol::{TypeContext, TypeSymbol};
pub use tag::TypeTag;
