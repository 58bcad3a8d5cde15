//! Error types for model-set validation.

use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors reported by structural validation of a model set.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two models resolve to the same table name.
    #[error("models '{first}' and '{second}' both map to table '{table}'")]
    DuplicateTable {
        /// First model using the table.
        first: String,
        /// Second model using the table.
        second: String,
        /// The colliding table name.
        table: String,
    },

    /// An enum attribute declares no values.
    #[error("enum attribute '{model}.{attribute}' declares no values")]
    EmptyEnum {
        /// Model name.
        model: String,
        /// Attribute name.
        attribute: String,
    },

    /// A composite index names an attribute the model does not declare.
    #[error("index '{index}' on model '{model}' references unknown attribute '{column}'")]
    UnknownIndexColumn {
        /// Model name.
        model: String,
        /// Index name.
        index: String,
        /// The unknown column.
        column: String,
    },
}
