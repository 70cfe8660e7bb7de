//! Optional TOML configuration for the catalog and canonical groups.
//!
//! A deployment can replace the builtin check list, group table, or label
//! table wholesale; any omitted section keeps its builtin. Loaded
//! sections pass through the same validation as the builtins and fail
//! fast before anything else runs.

use crate::canonical::{CanonicalGroups, builtin_group_table, builtin_labels};
use crate::catalog::{Catalog, CheckDefinition};
use crate::error::CoreError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// On-disk configuration shape.
///
/// ```toml
/// [groups]
/// full_name = ["name", "holder_name"]
///
/// [labels]
/// full_name = "Full Name"
///
/// [[checks]]
/// id = "pan"
/// category = "employment"
/// displayName = "PAN Verification"
/// description = "Verify PAN card details"
/// rawFields = ["pan_number", "name", "dob", "initiator_id", "user_code"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationConfig {
    #[serde(default)]
    pub groups: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub checks: Option<Vec<CheckDefinition>>,
}

impl VerificationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        toml::from_str(text).map_err(|err| CoreError::InvalidConfig(err.to_string()))
    }

    /// Validate into a usable catalog and group table.
    pub fn into_parts(self) -> Result<(Catalog, CanonicalGroups), CoreError> {
        let catalog = match self.checks {
            Some(checks) => Catalog::new(checks)?,
            None => Catalog::builtin(),
        };
        let group_table: Vec<(String, Vec<String>)> = match self.groups {
            Some(groups) => groups.into_iter().collect(),
            None => builtin_group_table(),
        };
        let labels = self.labels.unwrap_or_else(builtin_labels);
        let groups = CanonicalGroups::new(group_table, labels)?;
        Ok((catalog, groups))
    }
}
