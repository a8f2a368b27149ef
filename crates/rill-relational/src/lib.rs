//! Relational table adapter
//!
//! Maps Rill record types onto relational tables: each field's type tag is
//! mapped to a column type through one fixed table, and the same table
//! drives parameter binding, so generated schemas and bound statements
//! cannot drift apart. Types that have no column representation (unions,
//! functions, errors, streams, tables) are rejected, never coerced.
//!
//! The adapter generates statements and binding plans; executing them is
//! behind the [`StatementExecutor`] contract, whose implementations own
//! their connection resources and must release them on every exit path.

mod column;
mod error;
mod provider;
mod statement;

pub use column::{bind_plan, column_type, ColumnBinding, SqlColumnType};
pub use error::{RelationalError, RelationalResult};
pub use provider::{StatementExecutor, TableProvider};
pub use statement::{
    count_statement, create_index_statement, create_table_statement, delete_statement,
    drop_statement, insert_statement, Statement,
};
