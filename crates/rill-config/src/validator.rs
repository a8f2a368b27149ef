//! Lock-step schema validation
//!
//! The validator walks the schema's declared properties against the
//! document. For every declared key present in the document, two
//! independent visitors run: one reporting properties a closed schema
//! does not declare, one checking the declared kind. Both accumulate
//! diagnostics; neither stops the walk. Descent continues only into
//! matching composite kinds, so a mismatched subtree is reported once and
//! not entered.

use crate::{DocumentKind, DocumentNode, Schema, SchemaType, Table};
use indexmap::IndexMap;
use rill_diagnostics::{Diagnostic, DiagnosticSink, RIL0200, RIL0201};

/// Dispatch over a document node's concrete kind
pub trait DocumentVisitor {
    /// A nested table
    fn visit_table(&mut self, _table: &Table) {}
    /// An array of tables
    fn visit_table_array(&mut self, _tables: &[Table]) {}
    /// An array of values
    fn visit_array(&mut self, _values: &[DocumentNode]) {}
    /// A scalar value
    fn visit_scalar(&mut self, _node: &DocumentNode) {}
}

impl DocumentNode {
    /// Dispatch to the visitor method for this node's kind
    pub fn accept<V: DocumentVisitor>(&self, visitor: &mut V) {
        match self {
            Self::Table(table) => visitor.visit_table(table),
            Self::TableArray(tables) => visitor.visit_table_array(tables),
            Self::Array(values) => visitor.visit_array(values),
            Self::Boolean(_) | Self::Integer(_) | Self::Float(_) | Self::String(_) => {
                visitor.visit_scalar(self)
            }
        }
    }
}

/// Validates a configuration document against a root schema
#[derive(Debug)]
pub struct ConfigValidator {
    root: Schema,
}

impl ConfigValidator {
    /// Create a validator for a root schema
    pub fn new(root: Schema) -> Self {
        Self { root }
    }

    /// Validate a document, accumulating diagnostics into `sink`
    ///
    /// Keys absent from the document produce no diagnostics; absence is
    /// permitted.
    pub fn validate(&self, document: &Table, sink: &mut DiagnosticSink) {
        process_properties(&self.root.properties, document, "", sink);
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn process_properties(
    properties: &IndexMap<String, Schema>,
    table: &Table,
    prefix: &str,
    sink: &mut DiagnosticSink,
) {
    for (key, schema) in properties {
        let Some(node) = table.get(key) else {
            continue;
        };
        let path = join_path(prefix, key);

        node.accept(&mut AdditionalPropertiesVisitor {
            schema,
            path: &path,
            sink: &mut *sink,
        });
        node.accept(&mut TypeCheckerVisitor {
            schema,
            path: &path,
            sink: &mut *sink,
        });

        match schema.schema_type {
            SchemaType::Object => {
                if let Some(child) = node.as_table() {
                    process_properties(&schema.properties, child, &path, sink);
                }
            }
            SchemaType::Array => {
                if let (Some(items), Some(tables)) = (&schema.items, node.as_table_array()) {
                    for (index, child) in tables.iter().enumerate() {
                        let element_path = format!("{path}[{index}]");
                        process_properties(&items.properties, child, &element_path, sink);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Reports table keys a closed schema does not declare
struct AdditionalPropertiesVisitor<'a> {
    schema: &'a Schema,
    path: &'a str,
    sink: &'a mut DiagnosticSink,
}

impl AdditionalPropertiesVisitor<'_> {
    fn check_table(&mut self, schema: &Schema, table: &Table, path: &str) {
        if schema.additional_properties {
            return;
        }
        for key in table.keys() {
            if !schema.properties.contains_key(key) {
                let full = join_path(path, key);
                self.sink.report(
                    Diagnostic::warning(
                        RIL0201,
                        format!("key '{full}' is not declared by the schema"),
                    )
                    .with_path(full.clone()),
                );
            }
        }
    }
}

impl DocumentVisitor for AdditionalPropertiesVisitor<'_> {
    fn visit_table(&mut self, table: &Table) {
        let schema = self.schema;
        let path = self.path.to_string();
        self.check_table(schema, table, &path);
    }

    fn visit_table_array(&mut self, tables: &[Table]) {
        let Some(items) = self.schema.items.clone() else {
            return;
        };
        for (index, table) in tables.iter().enumerate() {
            let path = format!("{}[{index}]", self.path);
            self.check_table(&items, table, &path);
        }
    }
}

/// Checks a document node's kind against the declared schema type
struct TypeCheckerVisitor<'a> {
    schema: &'a Schema,
    path: &'a str,
    sink: &'a mut DiagnosticSink,
}

impl TypeCheckerVisitor<'_> {
    fn report_mismatch(&mut self, expected: SchemaType, found: DocumentKind, path: &str) {
        self.sink.report(
            Diagnostic::error(
                RIL0200,
                format!(
                    "key '{path}' expects {}, found {found}",
                    kind_name(expected)
                ),
            )
            .with_path(path.to_string()),
        );
    }

    fn check_kind(&mut self, found: DocumentKind) {
        let expected = self.schema.schema_type;
        if !kind_matches(expected, found) {
            let path = self.path.to_string();
            self.report_mismatch(expected, found, &path);
        }
    }
}

impl DocumentVisitor for TypeCheckerVisitor<'_> {
    fn visit_table(&mut self, _table: &Table) {
        self.check_kind(DocumentKind::Table);
    }

    fn visit_table_array(&mut self, _tables: &[Table]) {
        self.check_kind(DocumentKind::TableArray);
    }

    fn visit_array(&mut self, values: &[DocumentNode]) {
        self.check_kind(DocumentKind::Array);
        // Element kinds against the item schema, one diagnostic per offender
        let Some(items) = self.schema.items.clone() else {
            return;
        };
        for (index, value) in values.iter().enumerate() {
            if !kind_matches(items.schema_type, value.kind()) {
                let path = format!("{}[{index}]", self.path);
                self.report_mismatch(items.schema_type, value.kind(), &path);
            }
        }
    }

    fn visit_scalar(&mut self, node: &DocumentNode) {
        self.check_kind(node.kind());
    }
}

fn kind_matches(expected: SchemaType, found: DocumentKind) -> bool {
    matches!(
        (expected, found),
        (SchemaType::Object, DocumentKind::Table)
            | (
                SchemaType::Array,
                DocumentKind::TableArray | DocumentKind::Array
            )
            | (SchemaType::String, DocumentKind::String)
            | (SchemaType::Integer, DocumentKind::Integer)
            | (
                SchemaType::Float,
                DocumentKind::Float | DocumentKind::Integer
            )
            | (SchemaType::Boolean, DocumentKind::Boolean)
    )
}

fn kind_name(schema_type: SchemaType) -> &'static str {
    match schema_type {
        SchemaType::Object => "a table",
        SchemaType::Array => "an array",
        SchemaType::String => "a string",
        SchemaType::Integer => "an integer",
        SchemaType::Float => "a float",
        SchemaType::Boolean => "a boolean",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matching() {
        assert!(kind_matches(SchemaType::Object, DocumentKind::Table));
        assert!(kind_matches(SchemaType::Float, DocumentKind::Integer));
        assert!(!kind_matches(SchemaType::Object, DocumentKind::String));
        assert!(!kind_matches(SchemaType::Integer, DocumentKind::Float));
    }
}
