use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::{ApprovalStatus, LeaveRequest};

/// Which requests feed `total_days_requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DaysBasis {
    #[default]
    All,
    ApprovedOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "total_requests": 2,
    "pending_requests": 1,
    "approved_requests": 1,
    "rejected_requests": 0,
    "total_days_requested": 5.0,
    "total_days_approved": 3.0,
    "leave_type_breakdown": { "Annual Leave": 2 },
    "monthly_breakdown": { "2026-03": 2 },
    "department_breakdown": { "IT": 2 }
}))]
pub struct LeaveStatistics {
    pub total_requests: usize,
    pub pending_requests: usize,
    pub approved_requests: usize,
    pub rejected_requests: usize,
    pub total_days_requested: f64,
    pub total_days_approved: f64,
    pub leave_type_breakdown: BTreeMap<String, usize>,
    /// keyed by start month, `YYYY-MM`
    pub monthly_breakdown: BTreeMap<String, usize>,
    pub department_breakdown: BTreeMap<String, usize>,
}

impl LeaveStatistics {
    /// Single pass over exactly the given requests.
    pub fn from_requests(requests: &[LeaveRequest], basis: DaysBasis) -> Self {
        let mut stats = LeaveStatistics {
            total_requests: requests.len(),
            ..Default::default()
        };

        for request in requests {
            let approved = request.approval_status == ApprovalStatus::Approved;
            match request.approval_status {
                ApprovalStatus::Pending => stats.pending_requests += 1,
                ApprovalStatus::Approved => stats.approved_requests += 1,
                ApprovalStatus::Rejected => stats.rejected_requests += 1,
                ApprovalStatus::Cancelled => {}
            }

            if basis == DaysBasis::All || approved {
                stats.total_days_requested += request.total_days;
            }
            if approved {
                stats.total_days_approved += request.total_days;
            }

            if let Some(leave_type) = &request.leave_type {
                *stats.leave_type_breakdown.entry(leave_type.clone()).or_default() += 1;
            }
            let month = request.start_date.format("%Y-%m").to_string();
            *stats.monthly_breakdown.entry(month).or_default() += 1;
            if let Some(department) = request.department.as_deref().filter(|d| !d.is_empty()) {
                *stats
                    .department_breakdown
                    .entry(department.to_string())
                    .or_default() += 1;
            }
        }

        stats
    }
}
