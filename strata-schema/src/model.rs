//! Model definitions and the ordered model set.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{SchemaError, SchemaResult};
use crate::value::DefaultValue;

/// Metadata for a single model attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    /// Declared default value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Whether the attribute carries a unique constraint.
    #[serde(default)]
    pub unique: bool,
    /// Explicit enum membership. Present exactly when the attribute is an
    /// enum; the list must be non-empty and its order is preserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl AttributeDef {
    /// Create a plain attribute with no metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the attribute unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Declare the attribute as an enum with the given values.
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// A model-level composite index declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name, unqualified. Rendering prefixes it with the table name.
    pub name: SmolStr,
    /// Attributes covered by the index, in order.
    pub columns: Vec<SmolStr>,
}

/// A model definition (maps to a database table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDef {
    /// Model name.
    pub name: SmolStr,
    /// Explicit table-name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<SmolStr>,
    /// Primary-key attribute name. Defaults to `id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<SmolStr>,
    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: IndexMap<SmolStr, AttributeDef>,
    /// Composite index declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDef>,
}

impl ModelDef {
    /// Create a new model definition.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            table: None,
            primary_key: None,
            attributes: IndexMap::new(),
            indexes: Vec::new(),
        }
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Override the table name.
    pub fn with_table(mut self, table: impl Into<SmolStr>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Override the primary-key attribute name.
    pub fn with_primary_key(mut self, name: impl Into<SmolStr>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    /// Add an attribute. Declaration order is preserved.
    pub fn attribute(mut self, name: impl Into<SmolStr>, def: AttributeDef) -> Self {
        self.attributes.insert(name.into(), def);
        self
    }

    /// Add a composite index declaration.
    pub fn index<I, S>(mut self, name: impl Into<SmolStr>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.indexes.push(IndexDef {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// The primary-key attribute name (`id` unless overridden).
    pub fn primary_key(&self) -> &str {
        self.primary_key.as_deref().unwrap_or("id")
    }

    /// The database table name: explicit override, or the lowercased,
    /// pluralized model name.
    pub fn table_name(&self) -> String {
        match &self.table {
            Some(table) => table.to_string(),
            None => pluralize(&self.name.to_lowercase()),
        }
    }
}

/// An ordered collection of model definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelSet {
    /// Models keyed by name, in declaration order.
    pub models: IndexMap<SmolStr, ModelDef>,
}

impl ModelSet {
    /// Create an empty model set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model. Declaration order is preserved.
    pub fn add_model(&mut self, model: ModelDef) {
        self.models.insert(model.name.clone(), model);
    }

    /// Get a model by name.
    pub fn get(&self, name: &str) -> Option<&ModelDef> {
        self.models.get(name)
    }

    /// Iterate models in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelDef> {
        self.models.values()
    }

    /// Number of models in the set.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Validate structural invariants: resolved table names must be unique,
    /// enum attributes must declare at least one value, and composite
    /// indexes may only name declared attributes.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut tables: HashMap<String, &str> = HashMap::new();

        for model in self.iter() {
            let table = model.table_name();
            if let Some(first) = tables.insert(table.clone(), model.name()) {
                return Err(SchemaError::DuplicateTable {
                    first: first.to_string(),
                    second: model.name().to_string(),
                    table,
                });
            }

            for (attr_name, attr) in &model.attributes {
                if let Some(values) = &attr.enum_values
                    && values.is_empty()
                {
                    return Err(SchemaError::EmptyEnum {
                        model: model.name().to_string(),
                        attribute: attr_name.to_string(),
                    });
                }
            }

            for index in &model.indexes {
                for column in &index.columns {
                    if !model.attributes.contains_key(column) {
                        return Err(SchemaError::UnknownIndexColumn {
                            model: model.name().to_string(),
                            index: index.name.to_string(),
                            column: column.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Naive English pluralization for table names.
fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        // "company" -> "companies", but "key" -> "keys"
        let vowel_before = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !vowel_before && !stem.is_empty() {
            return format!("{stem}ies");
        }
    }

    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }

    format!("{word}s")
}
