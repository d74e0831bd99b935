use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "title": "Annual Leave",
    "description": "Paid yearly vacation",
    "is_active": true,
    "requires_approval": true,
    "max_days_per_request": 15.0,
    "requires_documentation": false,
    "color_code": "#0078d4",
    "policy_url": null
}))]
pub struct LeaveType {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub requires_approval: bool,
    /// no cap when absent
    pub max_days_per_request: Option<f64>,
    pub requires_documentation: bool,
    pub color_code: Option<String>,
    pub policy_url: Option<String>,
}
