use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Encoded form of [`PointsPolicy::default`], as stored in `events.points_json`.
pub const DEFAULT_POLICY_JSON: &str = r#"{"1": 5, "2": 3, "3": 1}"#;

/// Points awarded per finishing position in one event.
///
/// Positions missing from the mapping are worth nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PointsPolicy(BTreeMap<i64, i64>);

impl Default for PointsPolicy {
    fn default() -> Self {
        Self(BTreeMap::from([(1, 5), (2, 3), (3, 1)]))
    }
}

impl PointsPolicy {
    pub fn points_for(&self, position: i64) -> i64 {
        self.0.get(&position).copied().unwrap_or(0)
    }

    pub fn as_map(&self) -> &BTreeMap<i64, i64> {
        &self.0
    }

    /// Decodes a stored policy strictly. Any shape or coercion problem yields `None`.
    pub fn decode(encoded: &str) -> Option<Self> {
        let Value::Object(entries) = serde_json::from_str::<Value>(encoded).ok()? else {
            return None;
        };

        let mut points = BTreeMap::new();
        for (key, value) in entries {
            let position = key.trim().parse::<i64>().ok()?;
            points.insert(position, coerce_points(&value)?);
        }

        Some(Self(points))
    }

    /// Resolves a stored policy, falling back to the default mapping.
    /// Never fails.
    pub fn resolve(encoded: Option<&str>) -> ResolvedPolicy {
        let decoded = encoded
            .filter(|text| !text.trim().is_empty())
            .and_then(Self::decode);

        match decoded {
            Some(policy) => ResolvedPolicy {
                policy,
                source: PolicySource::Decoded,
            },
            None => ResolvedPolicy {
                policy: Self::default(),
                source: PolicySource::Default,
            },
        }
    }
}

fn coerce_points(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Which path [`PointsPolicy::resolve`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PolicySource {
    Decoded,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    pub policy: PointsPolicy,
    pub source: PolicySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_policy_uses_default() {
        let resolved = PointsPolicy::resolve(None);
        assert_eq!(resolved.source, PolicySource::Default);
        assert_eq!(resolved.policy, PointsPolicy::default());
    }

    #[test]
    fn test_blank_policy_uses_default() {
        let resolved = PointsPolicy::resolve(Some("   "));
        assert_eq!(resolved.source, PolicySource::Default);
    }

    #[test]
    fn test_string_valued_points_are_coerced() {
        let resolved = PointsPolicy::resolve(Some(r#"{"1":"5","2":"3"}"#));
        assert_eq!(resolved.source, PolicySource::Decoded);
        assert_eq!(resolved.policy.points_for(1), 5);
        assert_eq!(resolved.policy.points_for(2), 3);
        assert_eq!(resolved.policy.points_for(3), 0);
    }

    #[test]
    fn test_custom_policy_with_zero_entry() {
        let resolved = PointsPolicy::resolve(Some(r#"{"1":10,"2":6,"3":4,"4":0}"#));
        assert_eq!(resolved.source, PolicySource::Decoded);
        assert_eq!(resolved.policy.points_for(1), 10);
        assert_eq!(resolved.policy.points_for(4), 0);
        assert_eq!(resolved.policy.as_map().len(), 4);
    }

    #[test]
    fn test_float_points_truncate() {
        let resolved = PointsPolicy::resolve(Some(r#"{"1": 5.9, " 2 ": 3}"#));
        assert_eq!(resolved.source, PolicySource::Decoded);
        assert_eq!(resolved.policy.points_for(1), 5);
        assert_eq!(resolved.policy.points_for(2), 3);
    }

    #[test]
    fn test_malformed_policies_fall_back() {
        for encoded in [
            "not json",
            "[5, 3, 1]",
            r#"{"first": 5}"#,
            r#"{"1": null}"#,
            r#"{"1": "five"}"#,
            r#"{"1": [5]}"#,
            r#"{"1.5": 5}"#,
        ] {
            let resolved = PointsPolicy::resolve(Some(encoded));
            assert_eq!(resolved.source, PolicySource::Default, "input: {encoded}");
            assert_eq!(resolved.policy, PointsPolicy::default());
        }
    }

    #[test]
    fn test_empty_object_awards_nothing() {
        let resolved = PointsPolicy::resolve(Some("{}"));
        assert_eq!(resolved.source, PolicySource::Decoded);
        assert_eq!(resolved.policy.points_for(1), 0);
    }

    #[test]
    fn test_default_text_decodes_to_default_policy() {
        assert_eq!(
            PointsPolicy::decode(DEFAULT_POLICY_JSON),
            Some(PointsPolicy::default())
        );
    }
}
