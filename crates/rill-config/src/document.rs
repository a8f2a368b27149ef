//! Configuration document trees
//!
//! The validator's host supplies the document as a tree of nodes exposing
//! their kind and children; this module is that tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A table: ordered keys mapping to child nodes
pub type Table = IndexMap<String, DocumentNode>;

/// One node of a configuration document
///
/// Untagged variant order matters for deserialization: an array of
/// tables must be tried before a plain value array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentNode {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Array of tables
    TableArray(Vec<Table>),
    /// Array of values
    Array(Vec<DocumentNode>),
    /// Nested table
    Table(Table),
}

/// Kind of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// A nested table
    Table,
    /// An array of tables
    TableArray,
    /// An array of values
    Array,
    /// A string scalar
    String,
    /// An integer scalar
    Integer,
    /// A float scalar
    Float,
    /// A boolean scalar
    Boolean,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::TableArray => "array of tables",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}

impl DocumentNode {
    /// The node's kind
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Table(_) => DocumentKind::Table,
            Self::TableArray(_) => DocumentKind::TableArray,
            Self::Array(_) => DocumentKind::Array,
            Self::String(_) => DocumentKind::String,
            Self::Integer(_) => DocumentKind::Integer,
            Self::Float(_) => DocumentKind::Float,
            Self::Boolean(_) => DocumentKind::Boolean,
        }
    }

    /// Child nodes: table values, array elements, empty for scalars
    pub fn children(&self) -> Vec<&DocumentNode> {
        match self {
            Self::Table(table) => table.values().collect(),
            Self::TableArray(tables) => {
                tables.iter().flat_map(|t| t.values()).collect()
            }
            Self::Array(values) => values.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// View as a table
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// View as an array of tables
    pub fn as_table_array(&self) -> Option<&[Table]> {
        match self {
            Self::TableArray(tables) => Some(tables),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let mut table = Table::new();
        table.insert("port".to_string(), DocumentNode::Integer(8080));
        let node = DocumentNode::Table(table);

        assert_eq!(node.kind(), DocumentKind::Table);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].kind(), DocumentKind::Integer);
        assert!(DocumentNode::Boolean(true).children().is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DocumentKind::TableArray.to_string(), "array of tables");
        assert_eq!(DocumentKind::String.to_string(), "string");
    }
}
