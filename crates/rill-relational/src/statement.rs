//! Statement generation
//!
//! Builds the DDL and DML text for a record-constrained table. Every
//! generated statement that takes parameters carries the binding plan it
//! was generated from.

use crate::{bind_plan, ColumnBinding, RelationalResult};
use rill_types::{TypeContext, TypeId};

/// A generated statement and the bindings its placeholders expect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Statement text
    pub sql: String,
    /// Binding plan, one entry per `?` placeholder
    pub bindings: Vec<ColumnBinding>,
}

impl Statement {
    /// A statement with no placeholders
    pub fn plain(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }
}

/// Generate the `CREATE TABLE` statement for a record row type
pub fn create_table_statement(
    cx: &TypeContext,
    table_name: &str,
    row: TypeId,
    primary_keys: &[&str],
) -> RelationalResult<Statement> {
    let plan = bind_plan(cx, row)?;
    let mut sql = format!("CREATE TABLE {table_name} (");
    let columns: Vec<String> = plan
        .iter()
        .map(|binding| format!("{} {}", binding.name, binding.column))
        .collect();
    sql.push_str(&columns.join(","));
    if !primary_keys.is_empty() {
        sql.push_str(", PRIMARY KEY (");
        sql.push_str(&primary_keys.join(","));
        sql.push(')');
    }
    sql.push(')');
    Ok(Statement::plain(sql))
}

/// Generate a `CREATE INDEX` statement for one indexed column
pub fn create_index_statement(table_name: &str, column: &str, index_id: u32) -> Statement {
    Statement::plain(format!(
        "CREATE INDEX IDX_{column}_{index_id} ON {table_name}({column})"
    ))
}

/// Generate the `INSERT` statement for a row, with its binding plan
pub fn insert_statement(
    cx: &TypeContext,
    table_name: &str,
    row: TypeId,
) -> RelationalResult<Statement> {
    let plan = bind_plan(cx, row)?;
    let names: Vec<&str> = plan.iter().map(|b| b.name.as_str()).collect();
    let placeholders = vec!["?"; plan.len()];
    Ok(Statement {
        sql: format!(
            "INSERT INTO {table_name} ({}) VALUES ({})",
            names.join(","),
            placeholders.join(",")
        ),
        bindings: plan,
    })
}

/// Generate the `DELETE` statement matching a full row, with its binding plan
pub fn delete_statement(
    cx: &TypeContext,
    table_name: &str,
    row: TypeId,
) -> RelationalResult<Statement> {
    let plan = bind_plan(cx, row)?;
    let clauses: Vec<String> = plan.iter().map(|b| format!("{} = ?", b.name)).collect();
    Ok(Statement {
        sql: format!("DELETE FROM {table_name} WHERE {}", clauses.join(" AND ")),
        bindings: plan,
    })
}

/// Generate the `DROP TABLE` statement
pub fn drop_statement(table_name: &str) -> Statement {
    Statement::plain(format!("DROP TABLE {table_name}"))
}

/// Generate the row count query
pub fn count_statement(table_name: &str) -> Statement {
    Statement::plain(format!("SELECT COUNT(*) FROM {table_name}"))
}
