//! Building a migration plan from a model set.

use tracing::debug;

use strata_schema::ModelSet;

use crate::infer;
use crate::plan::{Dialect, IndexKind, IndexPlan, MigrationPlan, TablePlan};

/// Build a [`MigrationPlan`] for a model set and dialect.
///
/// Pure and deterministic: identical input (including attribute declaration
/// order) always yields a structurally identical plan. Diffing and hashing
/// both rely on this.
pub fn build_plan(models: &ModelSet, dialect: Dialect) -> MigrationPlan {
    let mut tables = Vec::with_capacity(models.len());

    for model in models.iter() {
        let primary_key = model.primary_key();

        let mut columns = Vec::with_capacity(model.attributes.len());
        let mut indexes = Vec::new();

        for (attr_name, attr) in &model.attributes {
            let is_primary_key = attr_name.as_str() == primary_key;
            let mut column = infer::infer_column(attr_name, attr, is_primary_key);
            column.references = infer::infer_reference(models, attr_name);
            columns.push(column);

            if attr.unique && !is_primary_key {
                indexes.push(IndexPlan {
                    name: format!("{attr_name}_unique"),
                    columns: vec![attr_name.to_string()],
                    kind: IndexKind::Unique,
                });
            }
        }

        for index in &model.indexes {
            indexes.push(IndexPlan {
                name: index.name.to_string(),
                columns: index.columns.iter().map(ToString::to_string).collect(),
                kind: IndexKind::Index,
            });
        }

        tables.push(TablePlan {
            table: model.table_name(),
            columns,
            indexes,
        });
    }

    debug!(
        dialect = %dialect,
        tables = tables.len(),
        "built migration plan"
    );

    MigrationPlan { dialect, tables }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strata_schema::{AttributeDef, ModelDef};

    use super::*;
    use crate::plan::ColumnType;

    fn blog_models() -> ModelSet {
        let mut models = ModelSet::new();
        models.add_model(
            ModelDef::new("User")
                .attribute("id", AttributeDef::new())
                .attribute("email", AttributeDef::new().unique()),
        );
        models.add_model(
            ModelDef::new("Post")
                .attribute("id", AttributeDef::new())
                .attribute("user_id", AttributeDef::new()),
        );
        models
    }

    #[test]
    fn test_build_plan_tables_in_declaration_order() {
        let plan = build_plan(&blog_models(), Dialect::Postgres);

        let names: Vec<&str> = plan.tables.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(names, vec!["users", "posts"]);
    }

    #[test]
    fn test_primary_key_resolution() {
        let plan = build_plan(&blog_models(), Dialect::Postgres);

        let users = plan.table("users").unwrap();
        let id = users.primary_key().unwrap();
        assert_eq!(id.name, "id");
        assert_eq!(id.column_type, ColumnType::BigInt);
    }

    #[test]
    fn test_foreign_key_attached() {
        let plan = build_plan(&blog_models(), Dialect::Postgres);

        let user_id = plan.table("posts").unwrap().column("user_id").unwrap();
        let reference = user_id.references.as_ref().unwrap();
        assert_eq!(reference.table, "users");
        assert_eq!(reference.column, "id");
    }

    #[test]
    fn test_unique_attribute_derives_index() {
        let plan = build_plan(&blog_models(), Dialect::Postgres);

        let users = plan.table("users").unwrap();
        assert_eq!(users.indexes.len(), 1);
        assert_eq!(users.indexes[0].name, "email_unique");
        assert_eq!(users.indexes[0].kind, IndexKind::Unique);
        assert_eq!(users.indexes[0].columns, vec!["email".to_string()]);
    }

    #[test]
    fn test_unique_primary_key_derives_no_index() {
        let mut models = ModelSet::new();
        models.add_model(ModelDef::new("User").attribute("id", AttributeDef::new().unique()));

        let plan = build_plan(&models, Dialect::Postgres);
        assert!(plan.table("users").unwrap().indexes.is_empty());
    }

    #[test]
    fn test_composite_index() {
        let mut models = ModelSet::new();
        models.add_model(
            ModelDef::new("Event")
                .attribute("id", AttributeDef::new())
                .attribute("kind", AttributeDef::new())
                .attribute("created_at", AttributeDef::new())
                .index("kind_created_idx", ["kind", "created_at"]),
        );

        let plan = build_plan(&models, Dialect::Postgres);
        let events = plan.table("events").unwrap();
        assert_eq!(events.indexes.len(), 1);
        assert_eq!(events.indexes[0].kind, IndexKind::Index);
        assert_eq!(
            events.indexes[0].columns,
            vec!["kind".to_string(), "created_at".to_string()]
        );
    }

    #[test]
    fn test_determinism() {
        let models = blog_models();
        let first = build_plan(&models, Dialect::MySql);
        let second = build_plan(&models, Dialect::MySql);
        assert_eq!(first, second);
    }
}
