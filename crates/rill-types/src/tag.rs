//! The type tag registry
//!
//! Every type node carries exactly one [`TypeTag`] identifying its
//! structural kind. The set is closed: consumers dispatch on it with
//! exhaustive matches, so adding a kind is a compiler-forced change in
//! every consumer (the relational column mapping, the value layer, code
//! generation).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural kind of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    // === Scalar kinds ===
    /// The nil type, written `()`
    Nil,
    /// Boolean type
    Boolean,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Arbitrary precision decimal
    Decimal,
    /// Unicode string
    String,
    /// Unsigned 8-bit integer
    Byte,
    /// JSON document type
    Json,
    /// XML document type
    Xml,

    // === Structured kinds ===
    /// Array with an element type
    Array,
    /// Map with key and value types
    Map,
    /// Record with named fields
    Record,
    /// Tuple with positional members
    Tuple,
    /// Table constrained by a row type
    Table,

    // === Other kinds ===
    /// Union of member types
    Union,
    /// Function with parameter and return types
    Function,
    /// Error with an optional detail type
    Error,
    /// Stream with a value type and optional completion type
    Stream,
    /// Named reference to another type in the graph
    TypeRef,
}

impl TypeTag {
    /// The language keyword for this kind
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Nil => "()",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Byte => "byte",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Array => "array",
            Self::Map => "map",
            Self::Record => "record",
            Self::Tuple => "tuple",
            Self::Table => "table",
            Self::Union => "union",
            Self::Function => "function",
            Self::Error => "error",
            Self::Stream => "stream",
            Self::TypeRef => "typeref",
        }
    }

    /// Check if this is a scalar kind (no structural children)
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Nil
                | Self::Boolean
                | Self::Int
                | Self::Float
                | Self::Decimal
                | Self::String
                | Self::Byte
                | Self::Json
                | Self::Xml
        )
    }

    /// Check if this is a structured kind (container of other types)
    pub const fn is_structured(&self) -> bool {
        matches!(
            self,
            Self::Array | Self::Map | Self::Record | Self::Tuple | Self::Table
        )
    }

    /// Check if this is a numeric scalar kind
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Decimal | Self::Byte)
    }

    /// Check if this kind may carry a primary type parameter
    ///
    /// These are the kinds for which [`TypeSymbol::type_parameter`] can
    /// succeed: the array element, map value, stream value, table row,
    /// error detail, and reference target.
    ///
    /// [`TypeSymbol::type_parameter`]: crate::TypeSymbol::type_parameter
    pub const fn is_parameterized(&self) -> bool {
        matches!(
            self,
            Self::Array | Self::Map | Self::Stream | Self::Table | Self::Error | Self::TypeRef
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
