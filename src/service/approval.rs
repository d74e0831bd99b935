use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StoreError;
use crate::model::leave_request::ApprovalStatus;
use crate::store::LeaveStore;

/// Outcome an approver can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(self) -> ApprovalStatus {
        match self {
            Decision::Approve => ApprovalStatus::Approved,
            Decision::Reject => ApprovalStatus::Rejected,
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

/// Writes the decision onto one request, stamped now.
///
/// Nothing checks the current status, so repeating a call applies it again.
pub async fn decide(
    store: &dyn LeaveStore,
    id: u64,
    decision: Decision,
    comment: Option<&str>,
) -> Result<(), StoreError> {
    let comment = comment.map(str::trim).filter(|c| !c.is_empty());
    store
        .update_status(id, decision.status(), comment, Utc::now())
        .await?;
    tracing::info!(leave_id = id, status = %decision.status(), "Leave request decided");
    Ok(())
}

#[derive(Debug)]
pub struct BulkFailure {
    pub id: u64,
    pub error: StoreError,
}

#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// updated, in order
    pub applied: Vec<u64>,
    pub failed: Option<BulkFailure>,
    /// never attempted because an earlier update failed
    pub skipped: Vec<u64>,
}

/// Applies `decision` to each id in turn, stopping at the first failure.
///
/// Updates that already went through stay applied.
pub async fn decide_many(
    store: &dyn LeaveStore,
    ids: &[u64],
    decision: Decision,
    comment: Option<&str>,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();

    for (pos, &id) in ids.iter().enumerate() {
        if let Err(error) = decide(store, id, decision, comment).await {
            tracing::error!(error = %error, leave_id = id, "Bulk update stopped");
            outcome.skipped = ids[pos + 1..].to_vec();
            outcome.failed = Some(BulkFailure { id, error });
            break;
        }
        outcome.applied.push(id);
    }

    outcome
}
