//! MySQL dialect driver.

use crate::plan::{ColumnPlan, ColumnType, IndexKind, IndexPlan, TablePlan};

use super::{DialectDriver, default_literal, string_literal};

/// DDL generation for MySQL.
pub struct MySqlDriver;

impl MySqlDriver {
    fn column_definition(&self, column: &ColumnPlan) -> String {
        let mut parts = vec![self.quote_ident(&column.name)];

        if column.is_primary_key {
            parts.push(self.primary_key_type(column));
            parts.push("PRIMARY KEY".to_string());
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

impl DialectDriver for MySqlDriver {
    fn quote_ident(&self, name: &str) -> String {
        format!("`{name}`")
    }

    fn column_type(&self, column: &ColumnPlan) -> String {
        match column.column_type {
            ColumnType::String => "varchar(255)".to_string(),
            ColumnType::Text => "text".to_string(),
            ColumnType::Boolean => "tinyint(1)".to_string(),
            ColumnType::Integer => "int".to_string(),
            ColumnType::BigInt => "bigint".to_string(),
            ColumnType::Float => "float".to_string(),
            ColumnType::Double => "double".to_string(),
            ColumnType::Decimal => "decimal".to_string(),
            ColumnType::Date => "date".to_string(),
            ColumnType::DateTime => "datetime".to_string(),
            ColumnType::Json => "json".to_string(),
            // No CREATE TYPE in MySQL; the members are inlined.
            ColumnType::Enum => {
                let values: Vec<String> = column
                    .enum_values
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|v| string_literal(v))
                    .collect();
                format!("ENUM({})", values.join(", "))
            }
        }
    }

    fn primary_key_type(&self, column: &ColumnPlan) -> String {
        match column.column_type {
            ColumnType::BigInt => "bigint AUTO_INCREMENT".to_string(),
            ColumnType::Integer => "int AUTO_INCREMENT".to_string(),
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
        format!(
            "ALTER TABLE {} MODIFY COLUMN {} {};",
            self.quote_ident(table),
            self.quote_ident(&column.name),
            self.column_type(column)
        )
    }

    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {};", self.quote_ident(table))
    }

    fn migrations_table_ddl(&self) -> String {
        "CREATE TABLE IF NOT EXISTS migrations (\n    \
            id int AUTO_INCREMENT PRIMARY KEY,\n    \
            migration varchar(255) NOT NULL UNIQUE,\n    \
            executed_at datetime NOT NULL DEFAULT CURRENT_TIMESTAMP\n);"
            .to_string()
    }

    fn executed_migrations_query(&self) -> String {
        "SELECT migration FROM migrations ORDER BY id;".to_string()
    }

    fn record_migration_query(&self) -> String {
        "INSERT INTO migrations (migration) VALUES (?);".to_string()
    }
}
