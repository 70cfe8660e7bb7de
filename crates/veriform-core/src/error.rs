//! Error types for Veriform core operations.

/// Errors arising from invalid startup configuration.
///
/// These are the only fatal errors in the crate. Everything downstream of
/// a validated configuration degrades to documented defaults: unknown
/// check ids are skipped, missing field values become empty strings.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A raw field name appears in more than one canonical group, which
    /// makes deduplication ambiguous.
    #[error("overlapping canonical groups: {description}")]
    OverlappingGroups { description: String },

    /// Two catalog entries share the same check id.
    #[error("duplicate check id: {id}")]
    DuplicateCheckId { id: String },

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A transport-level failure from the verification backend.
///
/// Distinct from a backend-reported rejection: this means the call itself
/// could not complete (network, credentials, provider outage). The
/// dispatch router aborts the remainder of a batch on the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend transport failure: {0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
