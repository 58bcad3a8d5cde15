//! # strata-schema
//!
//! Model-definition types for the Strata migration engine.
//!
//! This crate provides:
//! - Declarative model definitions (`ModelDef`, `AttributeDef`, `IndexDef`)
//! - Typed default values (`DefaultValue`)
//! - An ordered model set (`ModelSet`) preserving declaration order
//! - Structural validation of a model set
//!
//! Model definitions are the *input* contract of the migration engine: a
//! loader (file-based, macro-based, or hand-written) produces a `ModelSet`,
//! and `strata-migrate` turns it into a normalized migration plan. Enum
//! membership is declared explicitly via `enum_values`; nothing is inferred
//! from opaque validator objects.
//!
//! ## Example
//!
//! ```rust
//! use strata_schema::{AttributeDef, ModelDef, ModelSet};
//!
//! let mut models = ModelSet::new();
//! models.add_model(
//!     ModelDef::new("User")
//!         .attribute("id", AttributeDef::new())
//!         .attribute("email", AttributeDef::new().unique()),
//! );
//!
//! assert_eq!(models.get("User").unwrap().table_name(), "users");
//! models.validate().unwrap();
//! ```

pub mod error;
pub mod model;
pub mod value;

pub use error::{SchemaError, SchemaResult};
pub use model::{AttributeDef, IndexDef, ModelDef, ModelSet};
pub use value::DefaultValue;
