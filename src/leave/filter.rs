use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::model::leave_request::{ApprovalStatus, LeaveRequest};

/// Independent predicates over leave requests. Every field that is set must
/// match; unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LeaveFilter {
    /// Filter by approval status
    #[schema(example = "Pending")]
    pub status: Option<ApprovalStatus>,
    /// Filter by leave type name
    #[schema(example = "Annual Leave")]
    pub leave_type: Option<String>,
    /// Filter by requester id
    #[schema(example = 12)]
    pub employee: Option<u64>,
    /// Filter by department
    #[schema(example = "IT")]
    pub department: Option<String>,
    /// Year the leave starts in
    #[schema(example = 2026)]
    pub year: Option<i32>,
    /// Case-insensitive text over requester name, leave type, comments and status
    #[schema(example = "trip")]
    pub search: Option<String>,
    /// Leave must start on or after this date
    #[schema(value_type = Option<String>, format = "date")]
    pub date_from: Option<NaiveDate>,
    /// Leave must end on or before this date
    #[schema(value_type = Option<String>, format = "date")]
    pub date_to: Option<NaiveDate>,
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

impl LeaveFilter {
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        if self.status.is_some_and(|s| s != request.approval_status) {
            return false;
        }
        if let Some(leave_type) = self.leave_type.as_deref() {
            if request.leave_type.as_deref() != Some(leave_type) {
                return false;
            }
        }
        if self.employee.is_some_and(|id| id != request.requester_id) {
            return false;
        }
        if let Some(department) = self.department.as_deref() {
            if request.department.as_deref() != Some(department) {
                return false;
            }
        }
        if self.year.is_some_and(|y| y != request.start_date.year()) {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = contains_ci(request.requester_name.as_deref(), &needle)
                || contains_ci(request.leave_type.as_deref(), &needle)
                || contains_ci(request.request_comments.as_deref(), &needle)
                || request.approval_status.to_string().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if self.date_from.is_some_and(|from| request.start_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| request.end_date > to) {
            return false;
        }
        true
    }

    /// Matching requests in source order.
    pub fn apply(&self, requests: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
        requests.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Newest submission first; ties keep their source order.
pub fn sort_by_submission_desc(requests: &mut [LeaveRequest]) {
    requests.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
}

/// Slice out one 1-based page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Vec<T> {
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    items.into_iter().skip(offset).take(per_page).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::request;
    use chrono::{Duration, TimeZone, Utc};

    fn sample() -> Vec<LeaveRequest> {
        let mut a = request(1, ApprovalStatus::Approved, 2.0);
        a.leave_type = Some("Sick Leave".into());
        a.request_comments = Some("Flu".into());
        let mut b = request(2, ApprovalStatus::Pending, 3.0);
        b.requester_id = 20;
        b.requester_name = Some("Mary Major".into());
        let mut c = request(3, ApprovalStatus::Approved, 1.0);
        c.department = Some("Sales".into());
        let d = request(4, ApprovalStatus::Rejected, 4.0);
        vec![a, b, c, d]
    }

    fn ids(requests: &[LeaveRequest]) -> Vec<u64> {
        requests.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        assert_eq!(ids(&LeaveFilter::default().apply(sample())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn status_filter_returns_only_that_status() {
        let filter = LeaveFilter {
            status: Some(ApprovalStatus::Approved),
            ..Default::default()
        };
        let out = filter.apply(sample());
        assert_eq!(ids(&out), vec![1, 3]);
        assert!(out.iter().all(|r| r.approval_status == ApprovalStatus::Approved));
    }

    #[test]
    fn combined_filters_intersect() {
        let approved = LeaveFilter {
            status: Some(ApprovalStatus::Approved),
            ..Default::default()
        };
        let it = LeaveFilter {
            department: Some("IT".into()),
            ..Default::default()
        };
        let both = LeaveFilter {
            status: Some(ApprovalStatus::Approved),
            department: Some("IT".into()),
            ..Default::default()
        };

        let left = ids(&approved.apply(sample()));
        let right = ids(&it.apply(sample()));
        let expected: Vec<u64> = left.iter().copied().filter(|id| right.contains(id)).collect();
        assert_eq!(ids(&both.apply(sample())), expected);
        assert_eq!(expected, vec![1]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_type_comments_and_status() {
        let by = |text: &str| {
            ids(&LeaveFilter {
                search: Some(text.into()),
                ..Default::default()
            }
            .apply(sample()))
        };
        assert_eq!(by("MARY"), vec![2]);
        assert_eq!(by("sick"), vec![1]);
        assert_eq!(by("flu"), vec![1]);
        assert_eq!(by("pending"), vec![2]);
        assert_eq!(by("REJECT"), vec![4]);
        assert_eq!(by("   "), vec![1, 2, 3, 4]);
        assert!(by("nobody").is_empty());
    }

    #[test]
    fn date_range_requires_containment() {
        let mut requests = sample();
        let base = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        for (i, r) in requests.iter_mut().enumerate() {
            r.start_date = base + Duration::days(i as i64 * 10);
            r.end_date = r.start_date + Duration::days(2);
        }
        // 1: Mar 1-3, 2: Mar 11-13, 3: Mar 21-23, 4: Mar 31-Apr 2
        let filter = LeaveFilter {
            date_from: NaiveDate::from_ymd_opt(2026, 3, 2),
            date_to: NaiveDate::from_ymd_opt(2026, 4, 1),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(requests)), vec![2, 3]);
    }

    #[test]
    fn employee_type_and_year() {
        let filter = LeaveFilter {
            employee: Some(20),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec![2]);

        let filter = LeaveFilter {
            leave_type: Some("Sick Leave".into()),
            year: Some(2026),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec![1]);

        let filter = LeaveFilter {
            year: Some(2025),
            ..Default::default()
        };
        assert!(filter.apply(sample()).is_empty());
    }

    #[test]
    fn newest_submission_first_with_stable_ties() {
        let mut requests = sample();
        let t = |h| Utc.with_ymd_and_hms(2026, 2, 1, h, 0, 0).unwrap();
        requests[0].submission_date = t(8);
        requests[1].submission_date = t(10);
        requests[2].submission_date = t(8);
        requests[3].submission_date = t(9);
        sort_by_submission_desc(&mut requests);
        assert_eq!(ids(&requests), vec![2, 4, 1, 3]);
    }

    #[test]
    fn pages_are_one_based() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(items.clone(), 1, 3), vec![1, 2, 3]);
        assert_eq!(paginate(items.clone(), 3, 3), vec![7]);
        assert_eq!(paginate(items.clone(), 0, 3), vec![1, 2, 3]);
        assert!(paginate(items, 4, 3).is_empty());
    }
}
