//! SQL generation and migration file emission.
//!
//! Rendering a full plan happens in three passes: enum types and tables
//! first, then foreign keys (which need both endpoints to exist), then
//! indexes (no ordering dependency; last for readability).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::dialect::{DialectDriver, enum_type_name};
use crate::error::MigrateResult;
use crate::plan::{ColumnPlan, ColumnType, MigrationPlan, TablePlan};

/// Render a full `CREATE`-only migration for a plan.
pub fn generate_sql(plan: &MigrationPlan) -> Vec<String> {
    let driver = plan.dialect.driver();
    let mut created_enums = HashSet::new();
    let mut statements = Vec::new();

    for table in &plan.tables {
        statements.extend(enum_statements(driver, &table.columns, &mut created_enums));
        statements.push(driver.create_table(table));
    }

    for table in &plan.tables {
        statements.extend(foreign_key_statements(driver, table));
    }

    for table in &plan.tables {
        for index in &table.indexes {
            statements.push(driver.create_index(&table.table, index));
        }
    }

    statements
}

/// Enum-type creation statements for the given columns, deduplicated by
/// generated type name across the whole generation run.
pub(crate) fn enum_statements<'a>(
    driver: &dyn DialectDriver,
    columns: impl IntoIterator<Item = &'a ColumnPlan>,
    created: &mut HashSet<String>,
) -> Vec<String> {
    let mut statements = Vec::new();

    for column in columns {
        if column.column_type != ColumnType::Enum {
            continue;
        }
        let type_name = enum_type_name(&column.name);
        if !created.insert(type_name.clone()) {
            continue;
        }
        let values = column.enum_values.as_deref().unwrap_or_default();
        if let Some(statement) = driver.create_enum_type(&type_name, values) {
            statements.push(statement);
        }
    }

    statements
}

/// Foreign-key constraint statements for every referencing column of a table.
pub(crate) fn foreign_key_statements(driver: &dyn DialectDriver, table: &TablePlan) -> Vec<String> {
    table
        .columns
        .iter()
        .filter_map(|column| {
            column.references.as_ref().map(|reference| {
                driver.add_foreign_key(
                    &table.table,
                    &column.name,
                    &reference.table,
                    &reference.column,
                )
            })
        })
        .collect()
}

/// Monotonic counter disambiguating migration filenames produced within the
/// same clock second. Threaded explicitly through [`write_statements`]; there
/// is no process-global state.
#[derive(Debug, Default)]
pub struct FileSequence {
    next: u32,
}

impl FileSequence {
    /// Create a sequence starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn advance(&mut self) -> u32 {
        let current = self.next;
        self.next += 1;
        current
    }
}

/// Write each statement to its own file under `dir`, named
/// `<unix-seconds><seq>-<slug>.sql`. The zero-padded sequence keeps lexical
/// order stable even when several statements land in the same second.
pub fn write_statements(
    dir: impl AsRef<Path>,
    statements: &[String],
    sequence: &mut FileSequence,
) -> MigrateResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(statements.len());
    for statement in statements {
        let name = format!(
            "{}{:03}-{}.sql",
            Utc::now().timestamp(),
            sequence.advance(),
            statement_slug(statement)
        );
        let path = dir.join(name);
        std::fs::write(&path, statement)?;
        paths.push(path);
    }

    info!(count = paths.len(), dir = %dir.display(), "wrote migration files");
    Ok(paths)
}

/// Derive a filename slug from a statement's leading tokens.
fn statement_slug(statement: &str) -> String {
    let head = statement
        .lines()
        .next()
        .unwrap_or("")
        .split('(')
        .next()
        .unwrap_or("");

    let mut slug = String::new();
    for c in head.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.truncate(60);
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "statement".to_string()
    } else {
        slug.to_string()
    }
}
