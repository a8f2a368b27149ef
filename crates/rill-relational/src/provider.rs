//! Table provisioning over a statement executor
//!
//! [`TableProvider`] owns the naming counters and drives generated
//! statements through a [`StatementExecutor`]. The executor contract is
//! the adapter's resource boundary: an implementation acquires whatever
//! connection or cursor it needs per call and must release it on every
//! exit path, success or failure, before returning.

use crate::{
    count_statement, create_index_statement, create_table_statement, delete_statement,
    drop_statement, insert_statement, RelationalError, RelationalResult, Statement,
};
use rill_types::{TypeContext, TypeId};
use std::fmt;

/// Executes generated statements against a backing store
pub trait StatementExecutor {
    /// Failure detail reported by the store
    type Error: fmt::Display;

    /// Execute a statement for its effect
    fn execute(&mut self, statement: &Statement) -> Result<(), Self::Error>;

    /// Execute a count query and return the count
    fn query_count(&mut self, statement: &Statement) -> Result<u64, Self::Error>;
}

/// Creates and manipulates tables for record types
#[derive(Debug)]
pub struct TableProvider<E> {
    executor: E,
    table_id: u32,
    index_id: u32,
}

impl<E: StatementExecutor> TableProvider<E> {
    /// Create a provider over an executor
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            table_id: 0,
            index_id: 0,
        }
    }

    /// Access the underlying executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn next_table_id(&mut self) -> u32 {
        let id = self.table_id;
        self.table_id += 1;
        id
    }

    fn next_index_id(&mut self) -> u32 {
        let id = self.index_id;
        self.index_id += 1;
        id
    }

    fn run(&mut self, statement: Statement) -> RelationalResult<()> {
        log::debug!("executing statement: {}", statement.sql);
        self.executor
            .execute(&statement)
            .map_err(|e| RelationalError::StatementFailed {
                statement: statement.sql.clone(),
                message: e.to_string(),
            })
    }

    /// Create a table for a record row type, returning the generated name
    ///
    /// The name carries the row type's name (when it has one) and a
    /// per-provider counter, so repeated creations never collide.
    pub fn create_table(
        &mut self,
        cx: &TypeContext,
        row: TypeId,
        primary_keys: &[&str],
        index_columns: &[&str],
    ) -> RelationalResult<String> {
        let type_name = cx
            .arena()
            .node(cx.arena().resolve_ref(row))
            .name()
            .unwrap_or("T")
            .to_uppercase();
        let table_name = format!("TABLE_{}_{}", type_name, self.next_table_id());

        let statement = create_table_statement(cx, &table_name, row, primary_keys)?;
        self.run(statement)?;

        for column in index_columns {
            let index_id = self.next_index_id();
            self.run(create_index_statement(&table_name, column, index_id))?;
        }
        Ok(table_name)
    }

    /// Insert a row of the table's row type
    pub fn insert(
        &mut self,
        cx: &TypeContext,
        table_name: &str,
        row: TypeId,
    ) -> RelationalResult<()> {
        let statement = insert_statement(cx, table_name, row)?;
        self.run(statement)
    }

    /// Delete rows matching a full row of the table's row type
    pub fn delete(
        &mut self,
        cx: &TypeContext,
        table_name: &str,
        row: TypeId,
    ) -> RelationalResult<()> {
        let statement = delete_statement(cx, table_name, row)?;
        self.run(statement)
    }

    /// Drop a table
    pub fn drop_table(&mut self, table_name: &str) -> RelationalResult<()> {
        self.run(drop_statement(table_name))
    }

    /// Count the rows of a table
    pub fn row_count(&mut self, table_name: &str) -> RelationalResult<u64> {
        let statement = count_statement(table_name);
        log::debug!("executing statement: {}", statement.sql);
        self.executor
            .query_count(&statement)
            .map_err(|e| RelationalError::StatementFailed {
                statement: statement.sql.clone(),
                message: e.to_string(),
            })
    }
}
