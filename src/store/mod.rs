//! Storage seam for leave data.
//!
//! Handlers reach the database only through [`LeaveStore`], shared as
//! `web::Data<dyn LeaveStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{
    leave_balance::LeaveBalance,
    leave_request::{ApprovalStatus, LeaveRequest, NewLeaveRequest},
    leave_type::LeaveType,
    user::{UserCredentials, UserProfile},
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlLeaveStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Leave types flagged active, by id.
    async fn active_leave_types(&self) -> StoreResult<Vec<LeaveType>>;

    async fn leave_type(&self, id: u64) -> StoreResult<Option<LeaveType>>;

    /// Inserts a Pending request stamped with the current time.
    async fn create_request(&self, new: NewLeaveRequest) -> StoreResult<LeaveRequest>;

    /// Requests submitted by `requester_id`, newest submission first.
    async fn requests_for_user(&self, requester_id: u64) -> StoreResult<Vec<LeaveRequest>>;

    async fn approved_requests(&self) -> StoreResult<Vec<LeaveRequest>>;

    async fn all_requests(&self) -> StoreResult<Vec<LeaveRequest>>;

    async fn request(&self, id: u64) -> StoreResult<Option<LeaveRequest>>;

    async fn balance(
        &self,
        employee_id: u64,
        leave_type_id: u64,
    ) -> StoreResult<Option<LeaveBalance>>;

    /// Overwrites status, approval time and comment. Fails with
    /// [`StoreError::NotFound`] when no record has `id`.
    async fn update_status(
        &self,
        id: u64,
        status: ApprovalStatus,
        comment: Option<&str>,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;

    async fn user_profile(&self, user_id: u64) -> StoreResult<Option<UserProfile>>;

    async fn credentials(&self, username: &str) -> StoreResult<Option<UserCredentials>>;
}
