//! Additive-only plan diffing.
//!
//! Compares two migration plans and renders the minimal SQL evolving the old
//! schema into the new one. Only additions are ever emitted: new tables, new
//! columns on existing tables, new indexes. Anything present only in the
//! previous plan is left alone; removals and alterations belong to an
//! explicit reset operation, never to a diff.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::dialect::enum_type_name;
use crate::plan::{ColumnType, IndexPlan, MigrationPlan, TablePlan};
use crate::sql::{enum_statements, foreign_key_statements, generate_sql};

/// Marker returned when a diff finds nothing to do, so callers can tell
/// "ran and found no changes" apart from "did not run".
pub const NO_CHANGES_MARKER: &str = "-- No schema changes detected.";

/// Compute the additive SQL evolving `previous` into `next`.
///
/// A missing previous plan, or one for a different dialect, falls back to
/// full generation. The result is never empty: a changeless diff yields the
/// single [`NO_CHANGES_MARKER`] comment.
pub fn diff(previous: Option<&MigrationPlan>, next: &MigrationPlan) -> Vec<String> {
    let Some(previous) = previous else {
        debug!("no previous plan; generating full migration");
        return generate_sql(next);
    };

    if previous.dialect != next.dialect {
        warn!(
            previous = %previous.dialect,
            next = %next.dialect,
            "dialect changed between plans; generating full migration"
        );
        return generate_sql(next);
    }

    let driver = next.dialect.driver();
    let previous_tables: HashMap<&str, &TablePlan> = previous
        .tables
        .iter()
        .map(|t| (t.table.as_str(), t))
        .collect();

    // Enum types the previous schema already required must not be recreated.
    let mut created_enums: HashSet<String> = previous
        .tables
        .iter()
        .flat_map(|t| &t.columns)
        .filter(|c| c.column_type == ColumnType::Enum)
        .map(|c| enum_type_name(&c.name))
        .collect();

    let mut statements = Vec::new();

    // New tables, in the same three-pass order as full generation.
    let new_tables: Vec<&TablePlan> = next
        .tables
        .iter()
        .filter(|t| !previous_tables.contains_key(t.table.as_str()))
        .collect();

    for table in &new_tables {
        statements.extend(enum_statements(driver, &table.columns, &mut created_enums));
        statements.push(driver.create_table(table));
    }
    for table in &new_tables {
        statements.extend(foreign_key_statements(driver, table));
    }
    for table in &new_tables {
        for index in &table.indexes {
            statements.push(driver.create_index(&table.table, index));
        }
    }

    // Existing tables: columns present only in `next`. Pre-existing columns
    // are never altered, whatever else changed about them.
    for table in &next.tables {
        let Some(previous_table) = previous_tables.get(table.table.as_str()) else {
            continue;
        };
        let known: HashSet<&str> = previous_table
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        for column in &table.columns {
            if known.contains(column.name.as_str()) {
                continue;
            }
            statements.extend(enum_statements(
                driver,
                std::iter::once(column),
                &mut created_enums,
            ));
            statements.push(driver.add_column(&table.table, column));
            if let Some(reference) = &column.references {
                statements.push(driver.add_foreign_key(
                    &table.table,
                    &column.name,
                    &reference.table,
                    &reference.column,
                ));
            }
        }
    }

    // Existing tables: indexes present only in `next`.
    for table in &next.tables {
        let Some(previous_table) = previous_tables.get(table.table.as_str()) else {
            continue;
        };
        let known: HashSet<String> = previous_table.indexes.iter().map(index_key).collect();

        for index in &table.indexes {
            if !known.contains(&index_key(index)) {
                statements.push(driver.create_index(&table.table, index));
            }
        }
    }

    if statements.is_empty() {
        debug!("plans are equivalent; nothing to do");
        vec![NO_CHANGES_MARKER.to_string()]
    } else {
        debug!(statements = statements.len(), "computed additive diff");
        statements
    }
}

/// Composite identity of an index for comparison purposes.
fn index_key(index: &IndexPlan) -> String {
    format!(
        "{}:{}:{}",
        index.kind.as_str(),
        index.name,
        index.columns.join(",")
    )
}
