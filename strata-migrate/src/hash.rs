//! Canonical plan hashing.
//!
//! Fingerprints a plan for drift detection: serialize to JSON, sort object
//! keys at every nesting level (arrays keep positional order, primitive and
//! date leaves pass through untouched), then SHA-256 the canonical text.
//! The digest is stable under any key-insertion order produced upstream.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::MigrateResult;
use crate::plan::MigrationPlan;

/// Canonical SHA-256 fingerprint of a plan, hex-encoded.
pub fn hash_plan(plan: &MigrationPlan) -> MigrateResult<String> {
    hash_serializable(plan)
}

/// Canonical fingerprint of any serializable value. Serialization failure is
/// a programming error and surfaces as [`MigrateError::Serialize`].
///
/// [`MigrateError::Serialize`]: crate::error::MigrateError::Serialize
pub fn hash_serializable<T: Serialize>(value: &T) -> MigrateResult<String> {
    let value = serde_json::to_value(value)?;
    let mut canonical = String::new();
    write_canonical(&value, &mut canonical)?;

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

fn write_canonical(value: &Value, out: &mut String) -> MigrateResult<()> {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(&map[*key], out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        leaf => out.push_str(&serde_json::to_string(leaf)?),
    }
    Ok(())
}
