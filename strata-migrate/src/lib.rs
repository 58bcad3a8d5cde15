//! # strata-migrate
//!
//! Additive-only migration engine for Strata.
//!
//! This crate provides functionality for:
//! - Inferring a normalized schema plan from declarative model definitions
//! - SQL DDL generation for PostgreSQL, MySQL, and SQLite
//! - Additive-only diffing between schema versions
//! - Canonical plan hashing for drift detection
//! - Snapshot persistence and per-statement migration files
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────────┐
//! │  Model Set   │────▶│ Plan Builder │────▶│ Migration Plan │
//! └──────────────┘     └──────────────┘     └────────────────┘
//!                                              │           │
//!                          previous snapshot ──┤           │
//!                                              ▼           ▼
//!                                      ┌─────────────┐ ┌─────────────┐
//!                                      │ Diff Engine │ │ SQL Gen     │
//!                                      └─────────────┘ └─────────────┘
//!                                              │           │
//!                                              ▼           ▼
//!                                      dialect driver → SQL files
//! ```
//!
//! Everything flows one way: models become a plan, a plan becomes SQL text
//! through a dialect driver. Diffing two plans yields the minimal additive
//! SQL evolving the old schema into the new one. Columns, tables, and
//! indexes are only ever added, never dropped or altered; destructive
//! changes belong to an explicit external reset operation.
//!
//! ## Example
//!
//! ```rust
//! use strata_migrate::{Dialect, build_plan, diff, generate_sql, hash_plan};
//! use strata_schema::{AttributeDef, ModelDef, ModelSet};
//!
//! let mut models = ModelSet::new();
//! models.add_model(
//!     ModelDef::new("User")
//!         .attribute("id", AttributeDef::new())
//!         .attribute("email", AttributeDef::new().unique()),
//! );
//!
//! let plan = build_plan(&models, Dialect::Postgres);
//! let statements = generate_sql(&plan);
//! assert!(statements[0].starts_with("CREATE TABLE \"users\""));
//!
//! // A fresh diff against the same plan finds nothing to do.
//! assert_eq!(diff(Some(&plan), &plan), vec![strata_migrate::NO_CHANGES_MARKER.to_string()]);
//! let fingerprint = hash_plan(&plan).unwrap();
//! assert_eq!(fingerprint.len(), 64);
//! ```

pub mod builder;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod hash;
pub mod infer;
pub mod plan;
pub mod snapshot;
pub mod sql;

// Re-exports
pub use builder::build_plan;
pub use dialect::{DialectDriver, MySqlDriver, PostgresDriver, SqliteDriver, enum_type_name};
pub use diff::{NO_CHANGES_MARKER, diff};
pub use error::{MigrateError, MigrateResult};
pub use hash::{hash_plan, hash_serializable};
pub use plan::{
    ColumnPlan, ColumnReference, ColumnType, Dialect, IndexKind, IndexPlan, MigrationPlan,
    TablePlan,
};
pub use snapshot::{PlanSnapshot, snapshot_path};
pub use sql::{FileSequence, generate_sql, write_statements};
