//! Column type inference.
//!
//! Maps one model attribute to a normalized column description. Inference is
//! total: every attribute resolves to some type through the fallback chain,
//! so this module has no error path.

use strata_schema::{AttributeDef, DefaultValue, ModelSet};

use crate::plan::{ColumnPlan, ColumnReference, ColumnType};

/// Resolve the normalized type for an attribute. First match wins:
///
/// 1. Name heuristics: `*_id` is a bigint, `*_at` a datetime, `is_*`/`has_*`
///    a boolean.
/// 2. An explicit enum declaration.
/// 3. The runtime type of the declared default value.
/// 4. Fallback: bigint for the primary key, string for everything else.
pub fn infer_type(name: &str, attr: &AttributeDef, is_primary_key: bool) -> ColumnType {
    if name.ends_with("_id") {
        return ColumnType::BigInt;
    }
    if name.ends_with("_at") {
        return ColumnType::DateTime;
    }
    if name.starts_with("is_") || name.starts_with("has_") {
        return ColumnType::Boolean;
    }

    if attr.enum_values.is_some() {
        return ColumnType::Enum;
    }

    if let Some(default) = &attr.default {
        return match default {
            DefaultValue::String(s) if s.chars().count() <= 255 => ColumnType::String,
            DefaultValue::String(_) => ColumnType::Text,
            DefaultValue::Int(_) => ColumnType::Integer,
            DefaultValue::Float(_) => ColumnType::Float,
            DefaultValue::Bool(_) => ColumnType::Boolean,
            DefaultValue::BigInt(_) => ColumnType::BigInt,
            DefaultValue::DateTime(_) => ColumnType::DateTime,
        };
    }

    if is_primary_key {
        ColumnType::BigInt
    } else {
        ColumnType::String
    }
}

/// Build the full column description for an attribute.
///
/// Inferred columns are always nullable, matching the established behavior
/// of the model contract; a "required implies NOT NULL" rule would change
/// generated DDL for every existing schema and is deliberately not applied.
pub fn infer_column(name: &str, attr: &AttributeDef, is_primary_key: bool) -> ColumnPlan {
    let column_type = infer_type(name, attr, is_primary_key);

    let mut column = ColumnPlan::new(name, column_type);
    column.is_primary_key = is_primary_key;
    column.is_unique = attr.unique;
    column.has_default = attr.default.is_some();
    column.default_value = attr.default.clone();
    if column_type == ColumnType::Enum {
        column.enum_values = attr.enum_values.clone();
    }
    column
}

/// Infer a foreign-key reference from an attribute name.
///
/// `user_id` names the `User` model by convention: strip the `_id` suffix,
/// capitalize, and look the model up in the set. The reference points at
/// that model's table and primary key. Purely heuristic; an attribute named
/// `external_id` with no `External` model simply gets no reference.
pub fn infer_reference(models: &ModelSet, attr_name: &str) -> Option<ColumnReference> {
    let stem = attr_name.strip_suffix("_id")?;
    if stem.is_empty() {
        return None;
    }

    let model = models.get(&capitalize(stem))?;
    Some(ColumnReference {
        table: model.table_name(),
        column: model.primary_key().to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use strata_schema::ModelDef;

    use super::*;

    #[test]
    fn test_name_heuristics_win() {
        let attr = AttributeDef::new();
        assert_eq!(infer_type("user_id", &attr, false), ColumnType::BigInt);
        assert_eq!(infer_type("created_at", &attr, false), ColumnType::DateTime);
        assert_eq!(infer_type("is_active", &attr, false), ColumnType::Boolean);
        assert_eq!(infer_type("has_avatar", &attr, false), ColumnType::Boolean);

        // Heuristics outrank the default-value type.
        let attr = AttributeDef::new().with_default("pending");
        assert_eq!(infer_type("deleted_at", &attr, false), ColumnType::DateTime);
    }

    #[test]
    fn test_enum_marker() {
        let attr = AttributeDef::new().with_enum_values(["admin", "member"]);
        assert_eq!(infer_type("role", &attr, false), ColumnType::Enum);
    }

    #[test]
    fn test_default_value_types() {
        assert_eq!(
            infer_type("name", &AttributeDef::new().with_default("x"), false),
            ColumnType::String
        );
        let long = "x".repeat(256);
        assert_eq!(
            infer_type("bio", &AttributeDef::new().with_default(long), false),
            ColumnType::Text
        );
        assert_eq!(
            infer_type("count", &AttributeDef::new().with_default(0i64), false),
            ColumnType::Integer
        );
        assert_eq!(
            infer_type("score", &AttributeDef::new().with_default(0.5f64), false),
            ColumnType::Float
        );
        assert_eq!(
            infer_type("active", &AttributeDef::new().with_default(true), false),
            ColumnType::Boolean
        );
        assert_eq!(
            infer_type("serial", &AttributeDef::new().with_default(1i128), false),
            ColumnType::BigInt
        );
    }

    #[test]
    fn test_fallbacks() {
        let attr = AttributeDef::new();
        assert_eq!(infer_type("id", &attr, true), ColumnType::BigInt);
        assert_eq!(infer_type("nickname", &attr, false), ColumnType::String);
    }

    #[test]
    fn test_inferred_columns_are_nullable() {
        let column = infer_column("email", &AttributeDef::new().unique(), false);
        assert!(column.is_nullable);
        assert!(column.is_unique);
        assert!(!column.has_default);
    }

    #[test]
    fn test_enum_values_attached_only_for_enums() {
        // The `_at` heuristic outranks the enum marker, so no values attach.
        let attr = AttributeDef::new().with_enum_values(["a", "b"]);
        let column = infer_column("expired_at", &attr, false);
        assert_eq!(column.column_type, ColumnType::DateTime);
        assert!(column.enum_values.is_none());

        let column = infer_column("state", &attr, false);
        assert_eq!(column.column_type, ColumnType::Enum);
        assert_eq!(column.enum_values.as_deref().unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_reference_inference() {
        let mut models = ModelSet::new();
        models.add_model(ModelDef::new("User").attribute("id", AttributeDef::new()));

        let reference = infer_reference(&models, "user_id").unwrap();
        assert_eq!(reference.table, "users");
        assert_eq!(reference.column, "id");

        assert!(infer_reference(&models, "account_id").is_none());
        assert!(infer_reference(&models, "email").is_none());
        assert!(infer_reference(&models, "_id").is_none());
    }

    #[test]
    fn test_reference_uses_declared_primary_key() {
        let mut models = ModelSet::new();
        models.add_model(
            ModelDef::new("Team")
                .with_primary_key("uuid")
                .attribute("uuid", AttributeDef::new()),
        );

        let reference = infer_reference(&models, "team_id").unwrap();
        assert_eq!(reference.table, "teams");
        assert_eq!(reference.column, "uuid");
    }
}
