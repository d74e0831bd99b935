use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Entitlement of one employee for one leave type.
///
/// `remaining_days` is read as stored; it is expected to equal
/// `total_allowance - used_days` but nothing here enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 4,
    "employee_id": 12,
    "leave_type_id": 1,
    "leave_type": "Annual Leave",
    "total_allowance": 20.0,
    "used_days": 5.0,
    "remaining_days": 15.0,
    "carry_over_days": 2.0,
    "effective_date": "2026-01-01",
    "expiration_date": "2026-12-31"
}))]
pub struct LeaveBalance {
    pub id: u64,
    pub employee_id: u64,
    pub leave_type_id: u64,
    pub leave_type: Option<String>,
    pub total_allowance: f64,
    pub used_days: f64,
    pub remaining_days: f64,
    pub carry_over_days: f64,
    #[schema(value_type = Option<String>, format = "date")]
    pub effective_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub expiration_date: Option<NaiveDate>,
}
