use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::model::calendar_event::{CalendarEvent, CalendarEventProps, TeamCoverage};
use crate::model::leave_request::{ApprovalStatus, LeaveRequest};

pub const FALLBACK_COLOR: &str = "#666666";

const PALETTE: &[(&str, &str)] = &[
    ("Annual Leave", "#0078d4"),
    ("Sick Leave", "#d13438"),
    ("Personal Leave", "#107c10"),
    ("Maternity/Paternity", "#8764b8"),
    ("Emergency Leave", "#ff8c00"),
];

/// Stored leave-type color, else the palette entry for its name.
pub fn event_color(request: &LeaveRequest) -> String {
    if let Some(color) = request.color_code.as_deref().filter(|c| !c.is_empty()) {
        return color.to_string();
    }
    let name = request.leave_type.as_deref().unwrap_or_default();
    PALETTE
        .iter()
        .find(|(type_name, _)| *type_name == name)
        .map_or(FALLBACK_COLOR, |&(_, color)| color)
        .to_string()
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CalendarFilter {
    #[schema(example = "IT")]
    pub department: Option<String>,
    pub status: Option<ApprovalStatus>,
    /// matched against requester name and leave type
    #[schema(example = "john")]
    pub search: Option<String>,
}

impl CalendarFilter {
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        if let Some(department) = self.department.as_deref() {
            if request.department.as_deref() != Some(department) {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != request.approval_status) {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(search) => {
                let needle = search.to_lowercase();
                [request.requester_name.as_deref(), request.leave_type.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    pub fn apply(&self, requests: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
        requests.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Calendar entries for approved requests; other statuses are dropped.
pub fn to_events(requests: &[LeaveRequest]) -> Vec<CalendarEvent> {
    requests
        .iter()
        .filter(|r| r.is_approved())
        .map(|r| {
            let color = event_color(r);
            CalendarEvent {
                id: r.id.to_string(),
                title: format!(
                    "{} - {}",
                    r.requester_name.as_deref().unwrap_or("Unknown"),
                    r.leave_type.as_deref().unwrap_or("Unknown")
                ),
                start: r.start_date,
                end: r.end_date + Duration::days(1),
                background_color: color.clone(),
                border_color: color,
                extended_props: CalendarEventProps {
                    leave_request_id: r.id,
                    employee_name: r.requester_name.clone(),
                    leave_type: r.leave_type.clone(),
                    status: r.approval_status,
                    department: r.department.clone(),
                },
            }
        })
        .collect()
}

/// Share of the team at work on `date`.
///
/// Employees are counted once however many approved requests cover the
/// day. A team of zero is fully covered.
pub fn team_coverage(
    requests: &[LeaveRequest],
    date: NaiveDate,
    team_size: u32,
    critical_below: f64,
) -> TeamCoverage {
    let on_leave: HashSet<u64> = requests
        .iter()
        .filter(|r| r.is_approved() && r.start_date <= date && date <= r.end_date)
        .map(|r| r.requester_id)
        .collect();
    let employees_on_leave = (on_leave.len() as u32).min(team_size);

    let coverage_percentage = if team_size == 0 {
        100.0
    } else {
        f64::from(team_size - employees_on_leave) / f64::from(team_size) * 100.0
    };

    TeamCoverage {
        date,
        total_employees: team_size,
        employees_on_leave,
        coverage_percentage,
        critical_coverage: coverage_percentage < critical_below,
    }
}
