//! Tag to column type mapping
//!
//! One fixed table maps type tags to column types; schema generation and
//! parameter binding both go through it. The match is exhaustive over
//! [`TypeTag`], so a new tag cannot be added to the model without this
//! mapping taking a position on it.

use crate::{RelationalError, RelationalResult};
use rill_types::{TypeContext, TypeData, TypeId, TypeTag};
use std::fmt;

/// Column types of the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlColumnType {
    /// 64-bit integer column
    BigInt,
    /// Variable-length text column
    Varchar,
    /// Double-precision column
    Double,
    /// Boolean column
    Boolean,
    /// Large character object column
    Clob,
    /// Binary large object column
    Blob,
    /// Native array column
    Array,
}

impl fmt::Display for SqlColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::BigInt => "BIGINT",
            Self::Varchar => "VARCHAR",
            Self::Double => "DOUBLE",
            Self::Boolean => "BOOLEAN",
            Self::Clob => "CLOB",
            Self::Blob => "BLOB",
            Self::Array => "ARRAY",
        };
        write!(f, "{keyword}")
    }
}

/// Map one field's type to its column type
///
/// Fails with [`RelationalError::UnsupportedColumnType`] for tags outside
/// the mapping table; those types must be rejected, not coerced.
pub fn column_type(cx: &TypeContext, field: &str, ty: TypeId) -> RelationalResult<SqlColumnType> {
    let arena = cx.arena();
    let ty = arena.resolve_ref(ty);
    let unsupported = || RelationalError::UnsupportedColumnType {
        field: field.to_string(),
        type_signature: cx.signature_of(ty),
    };

    match arena.tag_of(ty) {
        TypeTag::Int => Ok(SqlColumnType::BigInt),
        TypeTag::String => Ok(SqlColumnType::Varchar),
        TypeTag::Float | TypeTag::Decimal => Ok(SqlColumnType::Double),
        TypeTag::Boolean => Ok(SqlColumnType::Boolean),
        TypeTag::Json | TypeTag::Xml => Ok(SqlColumnType::Clob),
        TypeTag::Array => match arena.node(ty).data() {
            TypeData::Array { element } => {
                if arena.tag_of(arena.resolve_ref(*element)) == TypeTag::Byte {
                    Ok(SqlColumnType::Blob)
                } else {
                    Ok(SqlColumnType::Array)
                }
            }
            _ => Err(unsupported()),
        },
        TypeTag::Nil
        | TypeTag::Byte
        | TypeTag::Map
        | TypeTag::Record
        | TypeTag::Tuple
        | TypeTag::Table
        | TypeTag::Union
        | TypeTag::Function
        | TypeTag::Error
        | TypeTag::Stream
        | TypeTag::TypeRef => Err(unsupported()),
    }
}

/// One column of a table, with its binding type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    /// Field name, used as the column name
    pub name: String,
    /// Column type, also the binding type for parameters
    pub column: SqlColumnType,
}

/// Derive the binding plan for a record's fields, in declared order
///
/// The plan drives both DDL generation and parameter binding, which keeps
/// the two consistent by construction.
pub fn bind_plan(cx: &TypeContext, row: TypeId) -> RelationalResult<Vec<ColumnBinding>> {
    let arena = cx.arena();
    let row = arena.resolve_ref(row);
    let TypeData::Record { fields, .. } = arena.node(row).data() else {
        return Err(RelationalError::NotARecord {
            type_signature: cx.signature_of(row),
        });
    };

    fields
        .iter()
        .map(|(name, ty)| {
            Ok(ColumnBinding {
                name: name.clone(),
                column: column_type(cx, name, *ty)?,
            })
        })
        .collect()
}
