//! Dialect drivers.
//!
//! One [`DialectDriver`] implementation per SQL dialect, selected statically
//! through the [`Dialect`] tag. All plan-to-DDL translation lives here; the
//! generator and diff engine only ever see statement strings.

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySqlDriver;
pub use postgres::PostgresDriver;
pub use sqlite::SqliteDriver;

use strata_schema::DefaultValue;

use crate::plan::{ColumnPlan, Dialect, IndexPlan, TablePlan};

/// Translates normalized plan objects into literal DDL fragments.
///
/// Generated identifiers (constraint names, table-qualified index names,
/// enum type names) render unquoted; user-supplied identifiers (tables,
/// columns) go through [`quote_ident`](Self::quote_ident).
pub trait DialectDriver {
    /// Quote a user-supplied identifier.
    fn quote_ident(&self, name: &str) -> String;

    /// Render the SQL type for a non-primary-key column.
    fn column_type(&self, column: &ColumnPlan) -> String;

    /// Render the SQL type for the primary-key column, using the dialect's
    /// auto-increment pseudo-type where one exists.
    fn primary_key_type(&self, column: &ColumnPlan) -> String;

    /// Render the `DEFAULT ...` clause, or an empty string when the column
    /// has no default.
    fn default_clause(&self, column: &ColumnPlan) -> String;

    /// Statement creating a named enum type, or `None` where the dialect has
    /// no such concept (MySQL inlines `ENUM(...)`, SQLite uses a CHECK).
    fn create_enum_type(&self, name: &str, values: &[String]) -> Option<String>;

    /// Statement dropping a named enum type, or `None` where there is
    /// nothing to drop.
    fn drop_enum_type(&self, name: &str) -> Option<String>;

    /// `CREATE TABLE` for a full table plan.
    fn create_table(&self, table: &TablePlan) -> String;

    /// `CREATE [UNIQUE] INDEX`, named `<table>_<index>`.
    fn create_index(&self, table: &str, index: &IndexPlan) -> String;

    /// `ALTER TABLE ... ADD CONSTRAINT <table>_<column>_fk FOREIGN KEY ...`.
    fn add_foreign_key(&self, table: &str, column: &str, ref_table: &str, ref_column: &str)
    -> String;

    /// `ALTER TABLE ... ADD COLUMN ...`.
    fn add_column(&self, table: &str, column: &ColumnPlan) -> String;

    /// Change an existing column's type. SQLite cannot do this safely and
    /// returns an explanatory comment instead of executable DDL; callers
    /// must treat that as "manual intervention required", not a failure.
    fn modify_column(&self, table: &str, column: &ColumnPlan) -> String;

    /// `DROP TABLE`. Never emitted by the diff engine; supplied for the
    /// external reset operation.
    fn drop_table(&self, table: &str) -> String;

    /// DDL for the `migrations` bookkeeping table.
    fn migrations_table_ddl(&self) -> String;

    /// Query returning already-executed migration names, oldest first.
    fn executed_migrations_query(&self) -> String;

    /// Parameterized insert recording an executed migration.
    fn record_migration_query(&self) -> String;
}

impl Dialect {
    /// The driver for this dialect.
    pub fn driver(self) -> &'static dyn DialectDriver {
        match self {
            Self::Postgres => &PostgresDriver,
            Self::MySql => &MySqlDriver,
            Self::Sqlite => &SqliteDriver,
        }
    }
}

/// The generated name of the enum type backing an enum column.
///
/// Keyed by column name only, so two tables sharing a column name share one
/// type; generation deduplicates on this name.
pub fn enum_type_name(column: &str) -> String {
    format!("{column}_type")
}

/// Escape and quote a string for use as a SQL literal.
pub(crate) fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render a default value as a SQL literal. Dialects without a boolean type
/// pass `boolean_as_int` to get `1`/`0` instead of `TRUE`/`FALSE`.
pub(crate) fn default_literal(value: &DefaultValue, boolean_as_int: bool) -> String {
    match value {
        DefaultValue::String(s) => string_literal(s),
        DefaultValue::Int(v) => v.to_string(),
        DefaultValue::Float(v) => v.to_string(),
        DefaultValue::BigInt(v) => v.to_string(),
        DefaultValue::Bool(v) => {
            if boolean_as_int {
                if *v { "1" } else { "0" }.to_string()
            } else {
                if *v { "TRUE" } else { "FALSE" }.to_string()
            }
        }
        DefaultValue::DateTime(v) => string_literal(&v.to_rfc3339()),
    }
}
