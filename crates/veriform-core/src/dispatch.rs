//! Dispatch router: one batch run over the selected checks.
//!
//! Checks are dispatched strictly sequentially, in selection order, with
//! exactly one suspension point per check at the backend-call boundary.
//! No two backend calls are ever in flight from one batch: result order
//! stays deterministic and the selection state is never raced. Total
//! latency scales linearly with the number of selected checks, which is
//! the accepted cost.

use crate::canonical::{CanonicalGroups, Payload};
use crate::catalog::{Catalog, Category};
use crate::error::BackendError;
use crate::normalize::{NormalizedResponse, NormalizerRegistry};
use crate::selection::Selection;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Raw response envelope from the verification backend.
///
/// `success = false` is a provider-reported rejection and is recorded per
/// check; a transport failure is the `Err` of [`VerificationBackend::invoke`]
/// and aborts the batch instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BackendResponse {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Executes one named check against the downstream provider.
///
/// Deliberately minimal: one operation, opaque payload in, envelope out.
/// The router imposes no timeout of its own; if the deployment needs one
/// it belongs inside the implementation of this trait.
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    async fn invoke(&self, check_id: &str, payload: &Payload)
    -> Result<BackendResponse, BackendError>;
}

/// Receives normalized results, one at a time, in dispatch order.
///
/// Ownership of each result transfers here; the router keeps no history.
pub trait ResultSink: Send {
    fn accept(&mut self, result: VerificationResult);
}

impl ResultSink for Vec<VerificationResult> {
    fn accept(&mut self, result: VerificationResult) {
        self.push(result);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Success,
    Failed,
}

/// One emitted outcome. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub check_id: String,
    pub check_display_name: String,
    pub category: Category,
    pub status: CheckStatus,
    /// The exact raw payload sent downstream, system fields included.
    pub request_payload: Payload,
    pub normalized_response: NormalizedResponse,
    /// Provider-reported error, present only when `status` is `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Selected ids walked before the loop ended.
    pub attempted: usize,
    /// Results handed to the sink.
    pub emitted: usize,
    /// Ids absent from the catalog (no result emitted).
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Single operator-facing message when a transport failure stopped
    /// the batch. Results emitted before the stop stand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl BatchReport {
    fn empty() -> Self {
        Self {
            attempted: 0,
            emitted: 0,
            skipped: 0,
            succeeded: 0,
            failed: 0,
            aborted: None,
        }
    }
}

/// Run every selected check, in order, against `backend`, emitting one
/// result per resolvable check to `sink`.
///
/// Unknown ids are skipped, never fatal. A provider-reported failure is
/// recorded and the batch continues; a transport failure aborts the
/// remainder. The selection is cleared unconditionally afterwards.
pub async fn run_verification(
    selection: &mut Selection,
    catalog: &Catalog,
    groups: &CanonicalGroups,
    normalizers: &NormalizerRegistry,
    backend: &dyn VerificationBackend,
    sink: &mut dyn ResultSink,
) -> BatchReport {
    let mut report = BatchReport::empty();
    let selected: Vec<String> = selection.selected().to_vec();

    for check_id in &selected {
        report.attempted += 1;
        let Some(check) = catalog.find(check_id) else {
            report.skipped += 1;
            continue;
        };

        let values = selection.effective_values(check_id);
        let payload = groups.expand(check, &values);

        let response = match backend.invoke(check_id, &payload).await {
            Ok(response) => response,
            Err(err) => {
                // Root cause is not distinguishable at this layer, so a
                // single generic message covers the whole batch.
                report.aborted = Some(format!("verification batch aborted: {err}"));
                break;
            }
        };

        let normalized = normalizers.normalize(check_id, response.data.as_ref());
        let status = if response.success {
            report.succeeded += 1;
            CheckStatus::Success
        } else {
            report.failed += 1;
            CheckStatus::Failed
        };

        sink.accept(VerificationResult {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            check_id: check_id.clone(),
            check_display_name: check.display_name.clone(),
            category: check.category,
            status,
            request_payload: payload,
            normalized_response: normalized,
            error: if response.success { None } else { response.error },
        });
        report.emitted += 1;
    }

    // Drain policy: the session resets whether the batch completed,
    // partially skipped, or aborted.
    selection.clear_all();
    report
}
