//! SQLite dialect driver.
//!
//! SQLite's type system is affinity-based: strings, dates, and JSON all live
//! in TEXT columns, booleans and bigints in INTEGER columns. Enum columns
//! become TEXT with an inline CHECK constraint.

use crate::plan::{ColumnPlan, ColumnType, IndexKind, IndexPlan, TablePlan};

use super::{DialectDriver, default_literal, string_literal};

/// DDL generation for SQLite.
pub struct SqliteDriver;

impl SqliteDriver {
    fn column_definition(&self, column: &ColumnPlan) -> String {
        let mut parts = vec![self.quote_ident(&column.name)];

        if column.is_primary_key {
            parts.push(self.primary_key_type(column));
            match column.column_type {
                ColumnType::Integer | ColumnType::BigInt => {
                    parts.push("PRIMARY KEY AUTOINCREMENT".to_string());
                }
                _ => parts.push("PRIMARY KEY".to_string()),
            }
        } else {
            parts.push(self.column_type(column));
        }

        let default = self.default_clause(column);
        if !default.is_empty() {
            parts.push(default);
        }

        parts.join(" ")
    }
}

impl DialectDriver for SqliteDriver {
    fn quote_ident(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    fn column_type(&self, column: &ColumnPlan) -> String {
        match column.column_type {
            ColumnType::String | ColumnType::Text => "TEXT".to_string(),
            ColumnType::Boolean => "INTEGER".to_string(),
            ColumnType::Integer | ColumnType::BigInt => "INTEGER".to_string(),
            ColumnType::Float | ColumnType::Double => "REAL".to_string(),
            ColumnType::Decimal => "NUMERIC".to_string(),
            ColumnType::Date | ColumnType::DateTime => "TEXT".to_string(),
            ColumnType::Json => "TEXT".to_string(),
            ColumnType::Enum => {
                let values: Vec<String> = column
                    .enum_values
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|v| string_literal(v))
                    .collect();
                format!(
                    "TEXT CHECK ({} IN ({}))",
                    self.quote_ident(&column.name),
                    values.join(", ")
                )
            }
        }
    }

    fn primary_key_type(&self, column: &ColumnPlan) -> String {
        // AUTOINCREMENT requires the INTEGER PRIMARY KEY form; the keyword
        // itself is appended alongside PRIMARY KEY in column_definition.
        match column.column_type {
            ColumnType::Integer | ColumnType::BigInt => "INTEGER".to_string(),
            _ => self.column_type(column),
        }
    }

    fn default_clause(&self, column: &ColumnPlan) -> String {
        match &column.default_value {
            Some(value) => format!("DEFAULT {}", default_literal(value, true)),
            None => String::new(),
        }
    }

    fn create_enum_type(&self, _name: &str, _values: &[String]) -> Option<String> {
        None
    }

    fn drop_enum_type(&self, _name: &str) -> Option<String> {
        None
    }

    fn create_table(&self, table: &TablePlan) -> String {
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect();

        format!(
            "CREATE TABLE {} (\n    {}\n);",
            self.quote_ident(&table.table),
            columns.join(",\n    ")
        )
    }

    fn create_index(&self, table: &str, index: &IndexPlan) -> String {
        let unique = match index.kind {
            IndexKind::Unique => "UNIQUE ",
            IndexKind::Index => "",
        };
        let columns: Vec<String> = index.columns.iter().map(|c| self.quote_ident(c)).collect();

        format!(
            "CREATE {}INDEX {}_{} ON {} ({});",
            unique,
            table,
            index.name,
            self.quote_ident(table),
            columns.join(", ")
        )
    }

    fn add_foreign_key(
        &self,
        table: &str,
        column: &str,
        ref_table: &str,
        ref_column: &str,
    ) -> String {
        format!(
            "ALTER TABLE {} ADD CONSTRAINT {}_{}_fk FOREIGN KEY ({}) REFERENCES {}({});",
            self.quote_ident(table),
            table,
            column,
            self.quote_ident(column),
            self.quote_ident(ref_table),
            self.quote_ident(ref_column)
        )
    }

    fn add_column(&self, table: &str, column: &ColumnPlan) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {};",
            self.quote_ident(table),
            self.column_definition(column)
        )
    }

    fn modify_column(&self, table: &str, column: &ColumnPlan) -> String {
        // Not executable: SQLite cannot alter a column in place, and a
        // drop-and-recreate would lose data.
        format!(
            "-- SQLite cannot modify column {} on {}; manual intervention required.",
            self.quote_ident(&column.name),
            self.quote_ident(table)
        )
    }

    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {};", self.quote_ident(table))
    }

    fn migrations_table_ddl(&self) -> String {
        "CREATE TABLE IF NOT EXISTS migrations (\n    \
            id INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
            migration TEXT NOT NULL UNIQUE,\n    \
            executed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP\n);"
            .to_string()
    }

    fn executed_migrations_query(&self) -> String {
        "SELECT migration FROM migrations ORDER BY id;".to_string()
    }

    fn record_migration_query(&self) -> String {
        "INSERT INTO migrations (migration) VALUES (?);".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_primary_key_autoincrement() {
        let driver = SqliteDriver;
        let id = {
            let mut c = ColumnPlan::new("id", ColumnType::BigInt);
            c.is_primary_key = true;
            c
        };
        assert_eq!(
            driver.column_definition(&id),
            "\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"
        );
    }

    #[test]
    fn test_enum_check_constraint() {
        let driver = SqliteDriver;
        let mut role = ColumnPlan::new("role", ColumnType::Enum);
        role.enum_values = Some(vec!["admin".to_string(), "member".to_string()]);

        assert_eq!(
            driver.column_type(&role),
            "TEXT CHECK (\"role\" IN ('admin', 'member'))"
        );
        assert!(driver.create_enum_type("role_type", &[]).is_none());
    }

    #[test]
    fn test_affinity_mappings() {
        let driver = SqliteDriver;
        assert_eq!(
            driver.column_type(&ColumnPlan::new("a", ColumnType::Boolean)),
            "INTEGER"
        );
        assert_eq!(
            driver.column_type(&ColumnPlan::new("a", ColumnType::Json)),
            "TEXT"
        );
        assert_eq!(
            driver.column_type(&ColumnPlan::new("a", ColumnType::DateTime)),
            "TEXT"
        );
        assert_eq!(
            driver.column_type(&ColumnPlan::new("a", ColumnType::Double)),
            "REAL"
        );
    }

    #[test]
    fn test_modify_column_is_a_comment() {
        let driver = SqliteDriver;
        let column = ColumnPlan::new("age", ColumnType::Integer);
        let stmt = driver.modify_column("users", &column);
        assert!(stmt.starts_with("--"));
        assert!(stmt.contains("manual intervention"));
    }

    #[test]
    fn test_boolean_default_stored_as_int() {
        let driver = SqliteDriver;
        let mut column = ColumnPlan::new("active", ColumnType::Boolean);
        column.has_default = true;
        column.default_value = Some(false.into());
        assert_eq!(driver.default_clause(&column), "DEFAULT 0");
    }
}
