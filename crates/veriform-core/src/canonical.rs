//! Field canonicalization: the bidirectional mapping between raw
//! per-check field names and canonical logical fields.
//!
//! Unrelated checks ask for semantically identical inputs under different
//! names (`pan_number`, `aadhaar_number`, `voter_id` are all "an
//! identification number"). Canonical groups collapse those variants so
//! the operator fills each logical field once; `expand` reverses the
//! mapping at dispatch time to rebuild each check's raw payload.
//!
//! Both directions are pure functions of the validated group table and
//! the catalog. Group disjointness is validated at construction — a raw
//! field claimed by two groups would make deduplication ambiguous, so
//! that configuration never starts.

use crate::catalog::{Catalog, CheckDefinition};
use crate::error::CoreError;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Fields populated from fixed system identities at dispatch time.
/// Never operator-visible and never part of the consolidated view.
pub const SYSTEM_FIELDS: [&str; 2] = ["initiator_id", "user_code"];

/// Fixed initiator identity attached to every outgoing payload.
pub const INITIATOR_ID: u64 = 7_417_247_999;

/// Fixed user code attached to every outgoing payload.
pub const USER_CODE: u64 = 32_515_001;

pub fn is_system_field(raw: &str) -> bool {
    SYSTEM_FIELDS.contains(&raw)
}

/// Whether a raw field holds a date value.
pub fn is_date_field(raw: &str) -> bool {
    raw.contains("date") || raw == "dob"
}

/// The per-check raw payload handed to the verification backend.
///
/// Values are strings except the system identities, which stay numeric.
pub type Payload = BTreeMap<String, Value>;

/// One logical field in the consolidated view, with the checks that need
/// it and the raw variants it subsumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedField {
    pub canonical_name: String,
    pub display_label: String,
    pub is_date_valued: bool,
    /// Display names of selected checks requiring this field, in
    /// selection order, one entry per contributing check.
    pub required_by: Vec<String>,
    /// Contributing raw field names, first-seen order.
    pub raw_fields: Vec<String>,
}

/// Validated mapping canonical name -> raw field variants, plus display
/// labels for the canonical names.
#[derive(Debug, Clone)]
pub struct CanonicalGroups {
    groups: Vec<(String, Vec<String>)>,
    labels: BTreeMap<String, String>,
}

impl CanonicalGroups {
    /// Build a group table, rejecting any raw field that appears in more
    /// than one group.
    pub fn new(
        groups: Vec<(String, Vec<String>)>,
        labels: BTreeMap<String, String>,
    ) -> Result<Self, CoreError> {
        let mut owner: BTreeMap<&str, &str> = BTreeMap::new();
        for (canonical, variants) in &groups {
            for raw in variants {
                if let Some(previous) = owner.insert(raw.as_str(), canonical.as_str()) {
                    return Err(CoreError::OverlappingGroups {
                        description: format!(
                            "raw field `{raw}` belongs to both `{previous}` and `{canonical}`"
                        ),
                    });
                }
            }
        }
        Ok(Self { groups, labels })
    }

    /// The built-in group table and labels.
    pub fn builtin() -> Self {
        Self {
            groups: builtin_group_table(),
            labels: builtin_labels(),
        }
    }

    /// Canonical name for a raw field: the owning group's name, or the
    /// raw field itself when no group claims it (identity fallback).
    pub fn canonicalize<'a>(&'a self, raw: &'a str) -> &'a str {
        self.groups
            .iter()
            .find(|(_, variants)| variants.iter().any(|variant| variant == raw))
            .map(|(canonical, _)| canonical.as_str())
            .unwrap_or(raw)
    }

    /// Human-readable label: the label table entry, or snake_case turned
    /// into Title Case.
    pub fn display_label(&self, field: &str) -> String {
        if let Some(label) = self.labels.get(field) {
            return label.clone();
        }
        field
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The deduplicated field view for a selection.
    ///
    /// Walks the selected checks in order, skipping system fields and
    /// unknown ids. The date-valued flag is decided by the first raw
    /// field that introduces a canonical field; later contributors never
    /// flip it. Output is sorted by display label (ordinal compare) so
    /// the view is reproducible for any insertion order of the same set.
    pub fn consolidated_fields(
        &self,
        catalog: &Catalog,
        selected: &[String],
    ) -> Vec<ConsolidatedField> {
        let mut accumulated: BTreeMap<String, ConsolidatedField> = BTreeMap::new();
        for id in selected {
            let Some(check) = catalog.find(id) else {
                continue;
            };
            for raw in &check.raw_fields {
                if is_system_field(raw) {
                    continue;
                }
                let canonical = self.canonicalize(raw).to_string();
                match accumulated.get_mut(&canonical) {
                    Some(existing) => {
                        if existing.required_by.last() != Some(&check.display_name) {
                            existing.required_by.push(check.display_name.clone());
                        }
                        if !existing.raw_fields.contains(raw) {
                            existing.raw_fields.push(raw.clone());
                        }
                    }
                    None => {
                        accumulated.insert(
                            canonical.clone(),
                            ConsolidatedField {
                                display_label: self.display_label(&canonical),
                                canonical_name: canonical,
                                is_date_valued: is_date_field(raw),
                                required_by: vec![check.display_name.clone()],
                                raw_fields: vec![raw.clone()],
                            },
                        );
                    }
                }
            }
        }
        let mut fields: Vec<ConsolidatedField> = accumulated.into_values().collect();
        fields.sort_by(|a, b| a.display_label.cmp(&b.display_label));
        fields
    }

    /// Rebuild one check's raw payload from field values.
    ///
    /// Each raw field resolves canonical-first, then by its own raw name
    /// (so a per-check form keyed by raw names works against the same
    /// state), then to the empty string. System fields come from the
    /// fixed constants, never from `values`.
    pub fn expand(&self, check: &CheckDefinition, values: &BTreeMap<String, String>) -> Payload {
        let mut payload = Payload::new();
        payload.insert("initiator_id".to_string(), json!(INITIATOR_ID));
        payload.insert("user_code".to_string(), json!(USER_CODE));
        for raw in &check.raw_fields {
            if is_system_field(raw) {
                continue;
            }
            let canonical = self.canonicalize(raw);
            let value = values
                .get(canonical)
                .or_else(|| values.get(raw.as_str()))
                .cloned()
                .unwrap_or_default();
            payload.insert(raw.clone(), Value::String(value));
        }
        payload
    }
}

pub(crate) fn builtin_group_table() -> Vec<(String, Vec<String>)> {
    let table: &[(&str, &[&str])] = &[
        (
            "full_name",
            &[
                "name",
                "holder_name",
                "owner_name",
                "doctor_name",
                "student_name",
                "certificate_holder",
                "license_holder",
                "policy_holder",
            ],
        ),
        ("date_of_birth", &["dob", "date_of_birth"]),
        ("phone_number", &["mobile_number", "phone_number"]),
        (
            "identification_number",
            &[
                "pan_number",
                "aadhaar_number",
                "voter_id",
                "passport_number",
                "license_number",
                "registration_number",
                "gstin_number",
                "policy_number",
                "certificate_number",
                "degree_number",
            ],
        ),
        (
            "organization_name",
            &[
                "company_name",
                "business_name",
                "university_name",
                "certifying_body",
                "regulatory_body",
                "employer_name",
                "bank_name",
                "insurer_name",
                "pharmacy_name",
            ],
        ),
        ("account_details", &["account_number", "ifsc_code", "salary_account"]),
        ("specialization_type", &["specialization", "permit_type", "license_type"]),
    ];
    table
        .iter()
        .map(|(canonical, variants)| {
            (
                canonical.to_string(),
                variants.iter().map(|raw| raw.to_string()).collect(),
            )
        })
        .collect()
}

pub(crate) fn builtin_labels() -> BTreeMap<String, String> {
    [
        ("full_name", "Full Name"),
        ("date_of_birth", "Date of Birth"),
        ("phone_number", "Phone Number"),
        ("identification_number", "ID/Registration Number"),
        ("organization_name", "Organization/Institution Name"),
        ("account_details", "Account Details"),
        ("specialization_type", "Type/Specialization"),
    ]
    .into_iter()
    .map(|(field, label)| (field.to_string(), label.to_string()))
    .collect()
}
