//! Operator session state: which checks are selected and what has been
//! typed into the form.
//!
//! Pure state transitions. No transition errors: an unknown id is a
//! silent no-op because the catalog, not the selection, is the source of
//! truth for validity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One operator session.
///
/// `values` is keyed by canonical name in consolidated-form mode and may
/// also hold raw-field keys (legacy per-form mode); `expand` resolves
/// both. `scoped` holds per-check raw-field values for the
/// one-form-per-check mode and is dropped with its check on deselect.
///
/// Stale-value policy: deselecting a check retains consolidated values.
/// The consolidated view and `expand` only read fields the current
/// selection requires, so retained values are harmless and reappear if
/// the check is selected again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    selected: Vec<String>,
    values: BTreeMap<String, String>,
    scoped: BTreeMap<String, BTreeMap<String, String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected check ids, insertion order, no duplicates.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Append a check id. Idempotent: re-selecting never duplicates or
    /// reorders.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    /// Remove a check id and its scoped values. Consolidated values are
    /// retained (see the struct docs). Unknown ids are no-ops.
    pub fn deselect(&mut self, id: &str) {
        self.selected.retain(|selected| selected != id);
        self.scoped.remove(id);
    }

    /// Overwrite one field value, keyed by canonical or raw name.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Overwrite one per-check raw-field value (one-form-per-check mode).
    pub fn set_scoped_value(
        &mut self,
        check_id: impl Into<String>,
        raw_field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.scoped
            .entry(check_id.into())
            .or_default()
            .insert(raw_field.into(), value.into());
    }

    /// The value map one check's expansion should see: consolidated
    /// values overlaid with that check's scoped values.
    pub fn effective_values(&self, check_id: &str) -> BTreeMap<String, String> {
        let mut merged = self.values.clone();
        if let Some(scoped) = self.scoped.get(check_id) {
            for (raw_field, value) in scoped {
                merged.insert(raw_field.clone(), value.clone());
            }
        }
        merged
    }

    /// Reset to empty. Invoked unconditionally after a dispatch run,
    /// whatever the per-check outcomes were (drain policy).
    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.values.clear();
        self.scoped.clear();
    }
}
