use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle state of a leave request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 7,
    "title": "Annual Leave - 2026-03-02",
    "requester_id": 12,
    "employee_id": "jdoe",
    "requester_name": "John Doe",
    "department": "IT",
    "manager_id": 3,
    "manager_name": "Ann Smith",
    "leave_type_id": 1,
    "leave_type": "Annual Leave",
    "color_code": "#0078d4",
    "start_date": "2026-03-02",
    "end_date": "2026-03-04",
    "total_days": 3.0,
    "is_partial_day": false,
    "partial_day_hours": null,
    "request_comments": "Family trip",
    "approval_status": "Pending",
    "approval_date": null,
    "approval_comments": null,
    "submission_date": "2026-02-20T09:30:00Z",
    "attachment_url": null
}))]
pub struct LeaveRequest {
    pub id: u64,
    pub title: String,
    pub requester_id: u64,
    /// login of the requester
    pub employee_id: String,
    pub requester_name: Option<String>,
    pub department: Option<String>,
    pub manager_id: Option<u64>,
    pub manager_name: Option<String>,
    pub leave_type_id: u64,
    pub leave_type: Option<String>,
    pub color_code: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub total_days: f64,
    pub is_partial_day: bool,
    pub partial_day_hours: Option<f64>,
    pub request_comments: Option<String>,
    pub approval_status: ApprovalStatus,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub approval_date: Option<DateTime<Utc>>,
    pub approval_comments: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub submission_date: DateTime<Utc>,
    pub attachment_url: Option<String>,
}

impl LeaveRequest {
    /// Title given to a record at submission, e.g. `Annual Leave - 2026-03-02`.
    pub fn title_for(leave_type: &str, start_date: NaiveDate) -> String {
        format!("{} - {}", leave_type, start_date.format("%Y-%m-%d"))
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}

/// Insert payload for a validated submission.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub requester_id: u64,
    pub employee_id: String,
    pub department: Option<String>,
    pub manager_id: Option<u64>,
    pub leave_type_id: u64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: f64,
    pub is_partial_day: bool,
    pub partial_day_hours: Option<f64>,
    pub request_comments: Option<String>,
    pub attachment_url: Option<String>,
}

impl NewLeaveRequest {
    pub fn title(&self) -> String {
        LeaveRequest::title_for(&self.leave_type, self.start_date)
    }
}
