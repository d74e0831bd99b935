use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{
    leave_balance::LeaveBalance,
    leave_request::{ApprovalStatus, LeaveRequest, NewLeaveRequest},
    leave_type::LeaveType,
    user::{UserCredentials, UserProfile},
};
use crate::store::{LeaveStore, StoreResult};

/// In-process store for tests. Status updates on ids in `failing` error out.
#[derive(Default)]
pub struct MemoryStore {
    pub leave_types: Mutex<Vec<LeaveType>>,
    pub requests: Mutex<Vec<LeaveRequest>>,
    pub balances: Mutex<Vec<LeaveBalance>>,
    pub users: Mutex<Vec<(UserProfile, UserCredentials)>>,
    pub failing: Mutex<HashSet<u64>>,
}

impl MemoryStore {
    pub fn fail_updates_for(&self, id: u64) {
        self.failing.lock().unwrap().insert(id);
    }

    pub fn snapshot(&self, id: u64) -> Option<LeaveRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    fn corrupt(msg: &str) -> StoreError {
        StoreError::Corrupt(msg.to_string())
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn active_leave_types(&self) -> StoreResult<Vec<LeaveType>> {
        Ok(self
            .leave_types
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }

    async fn leave_type(&self, id: u64) -> StoreResult<Option<LeaveType>> {
        Ok(self
            .leave_types
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create_request(&self, new: NewLeaveRequest) -> StoreResult<LeaveRequest> {
        let mut requests = self.requests.lock().unwrap();
        let id = requests.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let leave_type = self
            .leave_types
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == new.leave_type_id)
            .cloned();
        let requester_name = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == new.requester_id)
            .and_then(|(p, _)| p.display_name.clone());

        let request = LeaveRequest {
            id,
            title: new.title(),
            requester_id: new.requester_id,
            employee_id: new.employee_id,
            requester_name,
            department: new.department,
            manager_id: new.manager_id,
            manager_name: None,
            leave_type_id: new.leave_type_id,
            leave_type: Some(new.leave_type),
            color_code: leave_type.and_then(|t| t.color_code),
            start_date: new.start_date,
            end_date: new.end_date,
            total_days: new.total_days,
            is_partial_day: new.is_partial_day,
            partial_day_hours: new.partial_day_hours,
            request_comments: new.request_comments,
            approval_status: ApprovalStatus::Pending,
            approval_date: None,
            approval_comments: None,
            submission_date: Utc::now(),
            attachment_url: new.attachment_url,
        };
        requests.push(request.clone());
        Ok(request)
    }

    async fn requests_for_user(&self, requester_id: u64) -> StoreResult<Vec<LeaveRequest>> {
        let mut mine: Vec<LeaveRequest> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
        Ok(mine)
    }

    async fn approved_requests(&self) -> StoreResult<Vec<LeaveRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_approved())
            .cloned()
            .collect())
    }

    async fn all_requests(&self) -> StoreResult<Vec<LeaveRequest>> {
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn request(&self, id: u64) -> StoreResult<Option<LeaveRequest>> {
        Ok(self.snapshot(id))
    }

    async fn balance(
        &self,
        employee_id: u64,
        leave_type_id: u64,
    ) -> StoreResult<Option<LeaveBalance>> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.employee_id == employee_id && b.leave_type_id == leave_type_id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: u64,
        status: ApprovalStatus,
        comment: Option<&str>,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        if self.failing.lock().unwrap().contains(&id) {
            return Err(Self::corrupt("injected failure"));
        }
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        request.approval_status = status;
        request.approval_date = Some(at);
        if let Some(comment) = comment {
            request.approval_comments = Some(comment.to_string());
        }
        Ok(())
    }

    async fn user_profile(&self, user_id: u64) -> StoreResult<Option<UserProfile>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == user_id)
            .map(|(p, _)| p.clone()))
    }

    async fn credentials(&self, username: &str) -> StoreResult<Option<UserCredentials>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(_, c)| c.username == username)
            .map(|(_, c)| c.clone()))
    }
}
