//! The normalized migration plan model.
//!
//! A [`MigrationPlan`] is the in-memory representation of a full database
//! schema for one dialect. Plans are recomputed fresh from the current model
//! definitions on every invocation; they have no identity beyond structural
//! equality, and their JSON form (camelCase) is what snapshots persist.

use std::fmt;

use serde::{Deserialize, Serialize};
use strata_schema::DefaultValue;

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    MySql,
    /// SQLite.
    Sqlite,
}

impl Dialect {
    /// The dialect tag as used in snapshot paths and plan JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Short string (varchar-sized).
    String,
    /// Unbounded text.
    Text,
    /// Boolean.
    Boolean,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInt,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// JSON document.
    Json,
    /// Enumerated type; `enum_values` carries the members.
    Enum,
}

/// A foreign-key reference attached to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
}

/// One column of a table plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPlan {
    /// Column name.
    pub name: String,
    /// Normalized type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether this is the table's primary key.
    pub is_primary_key: bool,
    /// Whether the column carries a unique constraint.
    pub is_unique: bool,
    /// Whether the column is nullable.
    pub is_nullable: bool,
    /// Whether the column has a default value.
    pub has_default: bool,
    /// The default value, when `has_default` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    /// Foreign-key reference, if inferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ColumnReference>,
    /// Enum members; present exactly when `column_type` is [`ColumnType::Enum`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl ColumnPlan {
    /// Create a column with the given name and type. Columns start nullable
    /// with no constraints; inference fills in the rest.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_primary_key: false,
            is_unique: false,
            is_nullable: true,
            has_default: false,
            default_value: None,
            references: None,
            enum_values: None,
        }
    }
}

/// Kind of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Plain index.
    Index,
    /// Unique index.
    Unique,
}

impl IndexKind {
    /// The kind tag as it appears in plan JSON and index comparison keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Unique => "unique",
        }
    }
}

/// One index of a table plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPlan {
    /// Index name, unqualified. Rendering prefixes the table name so names
    /// cannot collide across tables.
    pub name: String,
    /// Covered columns, in order.
    pub columns: Vec<String>,
    /// Index kind.
    #[serde(rename = "type")]
    pub kind: IndexKind,
}

/// The plan for a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePlan {
    /// Table name.
    pub table: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnPlan>,
    /// Indexes in derivation order.
    pub indexes: Vec<IndexPlan>,
}

impl TablePlan {
    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnPlan> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary-key column, if the table has one.
    pub fn primary_key(&self) -> Option<&ColumnPlan> {
        self.columns.iter().find(|c| c.is_primary_key)
    }
}

/// The normalized schema for one dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationPlan {
    /// Target dialect.
    pub dialect: Dialect,
    /// Tables in model declaration order.
    pub tables: Vec<TablePlan>,
}

impl MigrationPlan {
    /// Get a table by name.
    pub fn table(&self, name: &str) -> Option<&TablePlan> {
        self.tables.iter().find(|t| t.table == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_tags() {
        assert_eq!(Dialect::Postgres.as_str(), "postgres");
        assert_eq!(Dialect::MySql.as_str(), "mysql");
        assert_eq!(Dialect::Sqlite.as_str(), "sqlite");
    }

    #[test]
    fn test_column_plan_defaults() {
        let column = ColumnPlan::new("email", ColumnType::String);
        assert!(column.is_nullable);
        assert!(!column.is_primary_key);
        assert!(!column.has_default);
        assert!(column.references.is_none());
    }

    #[test]
    fn test_plan_json_shape() {
        let column = ColumnPlan::new("user_id", ColumnType::BigInt);
        let json = serde_json::to_value(&column).unwrap();

        assert_eq!(json["type"], "bigint");
        assert_eq!(json["isPrimaryKey"], false);
        assert_eq!(json["isNullable"], true);
        // Absent optionals are omitted, not null.
        assert!(json.get("defaultValue").is_none());
        assert!(json.get("enumValues").is_none());
    }

    #[test]
    fn test_table_lookup() {
        let table = TablePlan {
            table: "users".to_string(),
            columns: vec![{
                let mut c = ColumnPlan::new("id", ColumnType::BigInt);
                c.is_primary_key = true;
                c
            }],
            indexes: vec![],
        };

        assert_eq!(table.primary_key().unwrap().name, "id");
        assert!(table.column("missing").is_none());
    }
}
