//! Schema validation for Rill configuration documents
//!
//! A configuration document is a TOML-style tree of tables, table arrays,
//! and scalar values. A [`Schema`] declares the expected shape; the
//! [`ConfigValidator`] walks document and schema in lock-step and
//! accumulates every independent violation into a caller-supplied
//! diagnostic sink instead of failing on the first.

mod document;
mod schema;
mod validator;

pub use document::{DocumentKind, DocumentNode, Table};
pub use schema::{Schema, SchemaType};
pub use validator::{ConfigValidator, DocumentVisitor};
