//! Typed default values for model attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A literal default value declared on an attribute.
///
/// The runtime type of a default participates in column type inference, so
/// the variants mirror the normalized column types a default can imply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultValue {
    /// A string default.
    String(String),
    /// An integer default.
    Int(i64),
    /// A floating-point default.
    Float(f64),
    /// A boolean default.
    Bool(bool),
    /// A big integer default (beyond i64 range).
    BigInt(i128),
    /// A date/time default.
    DateTime(DateTime<Utc>),
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i128> for DefaultValue {
    fn from(value: i128) -> Self {
        Self::BigInt(value)
    }
}

impl From<DateTime<Utc>> for DefaultValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(DefaultValue::from("a"), DefaultValue::String("a".to_string()));
        assert_eq!(DefaultValue::from(7i64), DefaultValue::Int(7));
        assert_eq!(DefaultValue::from(true), DefaultValue::Bool(true));
    }

    #[test]
    fn test_serde_round_trip() {
        let value = DefaultValue::Int(42);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"int":42}"#);

        let back: DefaultValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
