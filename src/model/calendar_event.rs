use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::ApprovalStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "7",
    "title": "John Doe - Annual Leave",
    "start": "2026-03-02",
    "end": "2026-03-05",
    "background_color": "#0078d4",
    "border_color": "#0078d4",
    "extended_props": {
        "leave_request_id": 7,
        "employee_name": "John Doe",
        "leave_type": "Annual Leave",
        "status": "Approved",
        "department": "IT"
    }
}))]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[schema(value_type = String, format = "date")]
    pub start: NaiveDate,
    /// exclusive, one day past the last day of leave
    #[schema(value_type = String, format = "date")]
    pub end: NaiveDate,
    pub background_color: String,
    pub border_color: String,
    pub extended_props: CalendarEventProps,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalendarEventProps {
    pub leave_request_id: u64,
    pub employee_name: Option<String>,
    pub leave_type: Option<String>,
    pub status: ApprovalStatus,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamCoverage {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub total_employees: u32,
    pub employees_on_leave: u32,
    pub coverage_percentage: f64,
    pub critical_coverage: bool,
}
