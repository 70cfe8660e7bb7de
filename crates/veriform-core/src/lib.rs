//! # Veriform Core
//!
//! One consolidated form for many verification checks: the operator
//! selects checks, fills each logical field once, and the core rebuilds
//! every check's service-specific payload, dispatches it sequentially to
//! a pluggable backend, and normalizes the heterogeneous responses.
//!
//! This crate is **UI-agnostic**: it does not prescribe how the form is
//! rendered or how the provider is reached. It only prescribes how field
//! values flow from one form to many checks and back.
//!
//! ## Architecture
//!
//! ```text
//! Catalog                ← Check definitions (id, category, raw fields)
//!     │
//! CanonicalGroups        ← raw field ⇄ canonical field, both directions
//!     │
//! Selection              ← Session state: selected ids + field values
//!     │
//! run_verification       ← Sequential dispatch over a VerificationBackend
//!     │
//! NormalizerRegistry     ← Per-check {verified?, details} derivation
//!     │
//! ResultSink             ← Ordered stream of VerificationResult
//! ```

pub mod canonical;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod selection;

pub use canonical::{
    CanonicalGroups, ConsolidatedField, INITIATOR_ID, Payload, SYSTEM_FIELDS, USER_CODE,
    is_date_field, is_system_field,
};
pub use catalog::{Catalog, Category, CheckDefinition};
pub use config::VerificationConfig;
pub use dispatch::{
    BackendResponse, BatchReport, CheckStatus, ResultSink, VerificationBackend,
    VerificationResult, run_verification,
};
pub use error::{BackendError, CoreError};
pub use normalize::{NormalizedResponse, NormalizerRegistry, VerifiedRule};
pub use selection::Selection;
