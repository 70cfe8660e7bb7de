//! Response normalization: heterogeneous downstream payloads reduced to
//! one `{verified?, details}` shape.
//!
//! `verified` is only ever populated by a registered per-check rule, and
//! only for checks whose response carries an explicit validity sentinel.
//! Absence means "not applicable" — it is never defaulted to `false`,
//! which would wrongly read as a definitive negative.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Uniform result shape for every check kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    pub details: Value,
}

/// Derives the `verified` flag for one check kind from its unwrapped
/// details. Returning `None` leaves the flag absent.
pub type VerifiedRule = fn(&Value) -> Option<bool>;

/// Registry of per-check `verified` derivation rules.
///
/// Adding a check kind with a validity sentinel is a registration, not a
/// new branch in the normalizer.
#[derive(Debug, Clone, Default)]
pub struct NormalizerRegistry {
    rules: BTreeMap<String, VerifiedRule>,
}

impl NormalizerRegistry {
    /// Registry with no rules: every check normalizes to details only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rules: currently only the PAN document check, whose
    /// `pan_status` field equals `"E"` exactly when the PAN exists and
    /// is valid.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register("pan", pan_verified);
        registry
    }

    pub fn register(&mut self, check_id: impl Into<String>, rule: VerifiedRule) {
        self.rules.insert(check_id.into(), rule);
    }

    /// Normalize one backend data payload for one check kind.
    ///
    /// The payload is unwrapped one envelope level when the backend nests
    /// it under a `data` field; unknown check kinds get details only.
    pub fn normalize(&self, check_id: &str, data: Option<&Value>) -> NormalizedResponse {
        let details = unwrap_envelope(data);
        let verified = self.rules.get(check_id).and_then(|rule| rule(&details));
        NormalizedResponse { verified, details }
    }
}

fn unwrap_envelope(data: Option<&Value>) -> Value {
    match data {
        Some(value) => value
            .get("data")
            .filter(|inner| !inner.is_null())
            .cloned()
            .unwrap_or_else(|| value.clone()),
        None => Value::Null,
    }
}

fn pan_verified(details: &Value) -> Option<bool> {
    Some(details.get("pan_status").and_then(Value::as_str) == Some("E"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pan_sentinel_yields_verified_true() {
        let registry = NormalizerRegistry::builtin();
        let data = json!({"pan_status": "E", "name_match": true});
        let normalized = registry.normalize("pan", Some(&data));
        assert_eq!(normalized.verified, Some(true));
        assert_eq!(normalized.details, data);
    }

    #[test]
    fn pan_without_sentinel_is_definitively_unverified() {
        let registry = NormalizerRegistry::builtin();
        let data = json!({"pan_status": "N"});
        assert_eq!(registry.normalize("pan", Some(&data)).verified, Some(false));
        // Missing status field is also a definitive negative for PAN.
        assert_eq!(registry.normalize("pan", Some(&json!({}))).verified, Some(false));
    }

    #[test]
    fn unknown_check_kind_leaves_verified_absent() {
        let registry = NormalizerRegistry::builtin();
        let data = json!({"gstin_status": "ACTIVE"});
        let normalized = registry.normalize("gstin", Some(&data));
        assert_eq!(normalized.verified, None);
        assert_eq!(normalized.details, data);
    }

    #[test]
    fn nested_envelope_is_unwrapped_one_level() {
        let registry = NormalizerRegistry::builtin();
        let data = json!({"data": {"pan_status": "E"}});
        let normalized = registry.normalize("pan", Some(&data));
        assert_eq!(normalized.verified, Some(true));
        assert_eq!(normalized.details, json!({"pan_status": "E"}));

        // A null inner envelope falls back to the outer payload.
        let hollow = json!({"data": null, "note": "flat"});
        assert_eq!(registry.normalize("gstin", Some(&hollow)).details, hollow);
    }

    #[test]
    fn absent_data_normalizes_to_null_details() {
        let registry = NormalizerRegistry::builtin();
        let normalized = registry.normalize("aadhaar", None);
        assert_eq!(normalized.verified, None);
        assert_eq!(normalized.details, Value::Null);
    }

    #[test]
    fn registration_is_additive() {
        let mut registry = NormalizerRegistry::empty();
        assert_eq!(registry.normalize("pan", Some(&json!({"pan_status": "E"}))).verified, None);

        registry.register("pan", pan_verified);
        assert_eq!(
            registry.normalize("pan", Some(&json!({"pan_status": "E"}))).verified,
            Some(true)
        );
    }

    #[test]
    fn verified_flag_is_omitted_from_serialized_output_when_absent() {
        let normalized = NormalizedResponse {
            verified: None,
            details: json!({"ok": true}),
        };
        let rendered = serde_json::to_value(&normalized).unwrap();
        assert!(rendered.get("verified").is_none());
    }
}
