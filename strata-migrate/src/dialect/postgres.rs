//! PostgreSQL dialect driver.

use crate::plan::{ColumnPlan, ColumnType, IndexKind, IndexPlan, TablePlan};

use super::{DialectDriver, default_literal, enum_type_name, string_literal};

/// DDL generation for PostgreSQL.
pub struct PostgresDriver;

impl PostgresDriver {
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

impl DialectDriver for PostgresDriver {
    fn quote_ident(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    fn column_type(&self, column: &ColumnPlan) -> String {
        match column.column_type {
            ColumnType::String => "varchar(255)".to_string(),
            ColumnType::Text => "text".to_string(),
            ColumnType::Boolean => "boolean".to_string(),
            ColumnType::Integer => "integer".to_string(),
            ColumnType::BigInt => "bigint".to_string(),
            ColumnType::Float => "real".to_string(),
            ColumnType::Double => "double precision".to_string(),
            ColumnType::Decimal => "decimal".to_string(),
            ColumnType::Date => "date".to_string(),
            ColumnType::DateTime => "timestamp".to_string(),
            ColumnType::Json => "jsonb".to_string(),
            ColumnType::Enum => enum_type_name(&column.name),
        }
    }

    fn primary_key_type(&self, column: &ColumnPlan) -> String {
        match column.column_type {
            ColumnType::BigInt => "BIGSERIAL".to_string(),
            ColumnType::Integer => "SERIAL".to_string(),
            _ => self.column_type(column),
        }
    }

    fn default_clause(&self, column: &ColumnPlan) -> String {
        match &column.default_value {
            Some(value) => format!("DEFAULT {}", default_literal(value, false)),
            None => String::new(),
        }
    }

    fn create_enum_type(&self, name: &str, values: &[String]) -> Option<String> {
        let values: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
        Some(format!(
            "CREATE TYPE {} AS ENUM ({});",
            name,
            values.join(", ")
        ))
    }

    fn drop_enum_type(&self, name: &str) -> Option<String> {
        Some(format!("DROP TYPE IF EXISTS {name};"))
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
            "ALTER TABLE {} ALTER COLUMN {} TYPE {};",
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
            id SERIAL PRIMARY KEY,\n    \
            migration varchar(255) NOT NULL UNIQUE,\n    \
            executed_at timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP\n);"
            .to_string()
    }

    fn executed_migrations_query(&self) -> String {
        "SELECT migration FROM migrations ORDER BY id;".to_string()
    }

    fn record_migration_query(&self) -> String {
        "INSERT INTO migrations (migration) VALUES ($1);".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ColumnType;

    #[test]
    fn test_primary_key_pseudo_types() {
        let driver = PostgresDriver;
        let id = {
            let mut c = ColumnPlan::new("id", ColumnType::BigInt);
            c.is_primary_key = true;
            c
        };
        assert_eq!(driver.primary_key_type(&id), "BIGSERIAL");
        assert_eq!(driver.column_definition(&id), "\"id\" BIGSERIAL PRIMARY KEY");
    }

    #[test]
    fn test_enum_column_uses_named_type() {
        let driver = PostgresDriver;
        let mut role = ColumnPlan::new("role", ColumnType::Enum);
        role.enum_values = Some(vec!["admin".to_string(), "member".to_string()]);

        assert_eq!(driver.column_type(&role), "role_type");
        assert_eq!(
            driver
                .create_enum_type("role_type", role.enum_values.as_ref().unwrap())
                .unwrap(),
            "CREATE TYPE role_type AS ENUM ('admin', 'member');"
        );
    }

    #[test]
    fn test_add_foreign_key() {
        let driver = PostgresDriver;
        assert_eq!(
            driver.add_foreign_key("posts", "user_id", "users", "id"),
            "ALTER TABLE \"posts\" ADD CONSTRAINT posts_user_id_fk \
             FOREIGN KEY (\"user_id\") REFERENCES \"users\"(\"id\");"
        );
    }

    #[test]
    fn test_create_unique_index() {
        let driver = PostgresDriver;
        let index = IndexPlan {
            name: "email_unique".to_string(),
            columns: vec!["email".to_string()],
            kind: IndexKind::Unique,
        };
        assert_eq!(
            driver.create_index("users", &index),
            "CREATE UNIQUE INDEX users_email_unique ON \"users\" (\"email\");"
        );
    }

    #[test]
    fn test_add_column_nullable_integer() {
        let driver = PostgresDriver;
        let age = ColumnPlan::new("age", ColumnType::Integer);
        assert_eq!(
            driver.add_column("users", &age),
            "ALTER TABLE \"users\" ADD COLUMN \"age\" integer;"
        );
    }

    #[test]
    fn test_default_clause() {
        let driver = PostgresDriver;
        let mut column = ColumnPlan::new("active", ColumnType::Boolean);
        assert_eq!(driver.default_clause(&column), "");

        column.has_default = true;
        column.default_value = Some(true.into());
        assert_eq!(driver.default_clause(&column), "DEFAULT TRUE");
    }

    #[test]
    fn test_bookkeeping_queries() {
        let driver = PostgresDriver;
        assert!(driver.migrations_table_ddl().contains("SERIAL PRIMARY KEY"));
        assert!(driver.record_migration_query().contains("$1"));
    }
}
