//! Persisted plan snapshots.
//!
//! A snapshot is the externally persisted "previous" side of a diff: the
//! plan, its canonical hash, and the time it was written, as JSON at a
//! dialect-qualified path. Snapshots are read once per diff invocation and
//! replaced wholesale after a successful apply; they are never mutated in
//! place. The read-diff-write sequence is not serialized here, so a caller
//! running concurrent migrations against one snapshot file must bring its
//! own locking.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::MigrateResult;
use crate::hash::hash_plan;
use crate::plan::{Dialect, MigrationPlan};

/// A persisted plan with its fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    /// The plan as of the last successful apply.
    pub plan: MigrationPlan,
    /// Canonical hash of `plan`.
    pub hash: String,
    /// When the snapshot was written.
    pub updated_at: DateTime<Utc>,
}

impl PlanSnapshot {
    /// Snapshot a plan, computing its hash.
    pub fn of(plan: MigrationPlan) -> MigrateResult<Self> {
        let hash = hash_plan(&plan)?;
        Ok(Self {
            plan,
            hash,
            updated_at: Utc::now(),
        })
    }

    /// Load a snapshot from disk. A missing or unreadable file is treated as
    /// "no previous plan" — the caller falls back to full generation rather
    /// than surfacing a parse error.
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).ok()?;

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "ignoring unparseable snapshot; treating as absent"
                );
                None
            }
        }
    }

    /// Write the snapshot, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> MigrateResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check whether a freshly built plan still matches this snapshot.
    pub fn is_current(&self, plan: &MigrationPlan) -> MigrateResult<bool> {
        Ok(hash_plan(plan)? == self.hash)
    }
}

/// The dialect-qualified snapshot path under a directory.
pub fn snapshot_path(dir: impl AsRef<Path>, dialect: Dialect) -> PathBuf {
    dir.as_ref().join(format!("schema.{dialect}.json"))
}

#[cfg(test)]
mod tests {
    use strata_schema::{AttributeDef, ModelDef, ModelSet};

    use super::*;
    use crate::builder::build_plan;

    fn sample_plan() -> MigrationPlan {
        let mut models = ModelSet::new();
        models.add_model(
            ModelDef::new("User")
                .attribute("id", AttributeDef::new())
                .attribute("email", AttributeDef::new().unique()),
        );
        build_plan(&models, Dialect::Postgres)
    }

    #[test]
    fn test_snapshot_path_is_dialect_qualified() {
        let path = snapshot_path("/tmp/strata", Dialect::MySql);
        assert_eq!(path, PathBuf::from("/tmp/strata/schema.mysql.json"));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(dir.path(), Dialect::Postgres);

        let snapshot = PlanSnapshot::of(sample_plan()).unwrap();
        snapshot.save(&path).unwrap();

        let loaded = PlanSnapshot::load(&path).unwrap();
        assert_eq!(loaded.plan, snapshot.plan);
        assert_eq!(loaded.hash, snapshot.hash);
        assert!(loaded.is_current(&sample_plan()).unwrap());
    }

    #[test]
    fn test_missing_file_is_absent() {
        assert!(PlanSnapshot::load("/nonexistent/schema.postgres.json").is_none());
    }

    #[test]
    fn test_corrupt_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.postgres.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(PlanSnapshot::load(&path).is_none());
    }

    #[test]
    fn test_drift_detection() {
        let snapshot = PlanSnapshot::of(sample_plan()).unwrap();

        let mut drifted = sample_plan();
        drifted.tables[0].table = "accounts".to_string();
        assert!(!snapshot.is_current(&drifted).unwrap());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = PlanSnapshot::of(sample_plan()).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("plan").is_some());
        assert!(json.get("hash").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
