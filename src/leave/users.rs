use std::collections::HashSet;

use crate::model::{leave_request::LeaveRequest, user::UserProfile};

/// Distinct requesters in order of first appearance.
pub fn profiles_from_requests(requests: &[LeaveRequest]) -> Vec<UserProfile> {
    let mut seen = HashSet::new();
    requests
        .iter()
        .filter(|r| seen.insert(r.requester_id))
        .map(|r| UserProfile {
            id: r.requester_id,
            display_name: r.requester_name.clone(),
            email: r.employee_id.clone(),
            department: r.department.clone(),
            manager_id: r.manager_id,
        })
        .collect()
}
