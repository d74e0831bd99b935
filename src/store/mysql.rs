use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};

use crate::error::StoreError;
use crate::model::{
    leave_balance::LeaveBalance,
    leave_request::{ApprovalStatus, LeaveRequest, NewLeaveRequest},
    leave_type::LeaveType,
    user::{UserCredentials, UserProfile},
};
use crate::store::{LeaveStore, StoreResult};

/// Request columns joined with requester, manager and leave type names.
const REQUEST_SELECT: &str = r#"
    SELECT
        r.id, r.title, r.requester_id, r.employee_id,
        u.display_name AS requester_name,
        r.department, r.manager_id,
        m.display_name AS manager_name,
        r.leave_type_id,
        t.title AS leave_type,
        t.color_code,
        r.start_date, r.end_date, r.total_days,
        r.is_partial_day, r.partial_day_hours, r.request_comments,
        r.approval_status, r.approval_date, r.approval_comments,
        r.submission_date, r.attachment_url
    FROM leave_requests r
    LEFT JOIN users u ON u.id = r.requester_id
    LEFT JOIN users m ON m.id = r.manager_id
    LEFT JOIN leave_types t ON t.id = r.leave_type_id
"#;

const LEAVE_TYPE_SELECT: &str = r#"
    SELECT id, title, description, is_active, requires_approval,
           max_days_per_request, requires_documentation, color_code, policy_url
    FROM leave_types
"#;

#[derive(FromRow)]
struct LeaveRequestRow {
    id: u64,
    title: String,
    requester_id: u64,
    employee_id: String,
    requester_name: Option<String>,
    department: Option<String>,
    manager_id: Option<u64>,
    manager_name: Option<String>,
    leave_type_id: u64,
    leave_type: Option<String>,
    color_code: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_days: f64,
    is_partial_day: bool,
    partial_day_hours: Option<f64>,
    request_comments: Option<String>,
    approval_status: String,
    approval_date: Option<DateTime<Utc>>,
    approval_comments: Option<String>,
    submission_date: DateTime<Utc>,
    attachment_url: Option<String>,
}

impl TryFrom<LeaveRequestRow> for LeaveRequest {
    type Error = StoreError;

    fn try_from(row: LeaveRequestRow) -> Result<Self, Self::Error> {
        let approval_status = row.approval_status.parse::<ApprovalStatus>().map_err(|_| {
            StoreError::Corrupt(format!(
                "leave request {} has status {:?}",
                row.id, row.approval_status
            ))
        })?;

        Ok(LeaveRequest {
            id: row.id,
            title: row.title,
            requester_id: row.requester_id,
            employee_id: row.employee_id,
            requester_name: row.requester_name,
            department: row.department,
            manager_id: row.manager_id,
            manager_name: row.manager_name,
            leave_type_id: row.leave_type_id,
            leave_type: row.leave_type,
            color_code: row.color_code,
            start_date: row.start_date,
            end_date: row.end_date,
            total_days: row.total_days,
            is_partial_day: row.is_partial_day,
            partial_day_hours: row.partial_day_hours,
            request_comments: row.request_comments,
            approval_status,
            approval_date: row.approval_date,
            approval_comments: row.approval_comments,
            submission_date: row.submission_date,
            attachment_url: row.attachment_url,
        })
    }
}

#[derive(FromRow)]
struct LeaveTypeRow {
    id: u64,
    title: String,
    description: Option<String>,
    is_active: bool,
    requires_approval: bool,
    max_days_per_request: Option<f64>,
    requires_documentation: bool,
    color_code: Option<String>,
    policy_url: Option<String>,
}

impl From<LeaveTypeRow> for LeaveType {
    fn from(row: LeaveTypeRow) -> Self {
        LeaveType {
            id: row.id,
            title: row.title,
            description: row.description,
            is_active: row.is_active,
            requires_approval: row.requires_approval,
            max_days_per_request: row.max_days_per_request,
            requires_documentation: row.requires_documentation,
            color_code: row.color_code,
            policy_url: row.policy_url,
        }
    }
}

#[derive(FromRow)]
struct LeaveBalanceRow {
    id: u64,
    employee_id: u64,
    leave_type_id: u64,
    leave_type: Option<String>,
    total_allowance: f64,
    used_days: f64,
    remaining_days: f64,
    carry_over_days: f64,
    effective_date: Option<NaiveDate>,
    expiration_date: Option<NaiveDate>,
}

impl From<LeaveBalanceRow> for LeaveBalance {
    fn from(row: LeaveBalanceRow) -> Self {
        LeaveBalance {
            id: row.id,
            employee_id: row.employee_id,
            leave_type_id: row.leave_type_id,
            leave_type: row.leave_type,
            total_allowance: row.total_allowance,
            used_days: row.used_days,
            remaining_days: row.remaining_days,
            carry_over_days: row.carry_over_days,
            effective_date: row.effective_date,
            expiration_date: row.expiration_date,
        }
    }
}

#[derive(FromRow)]
struct UserProfileRow {
    id: u64,
    display_name: Option<String>,
    email: String,
    department: Option<String>,
    manager_id: Option<u64>,
}

fn into_requests(rows: Vec<LeaveRequestRow>) -> StoreResult<Vec<LeaveRequest>> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

pub struct MySqlLeaveStore {
    pool: MySqlPool,
}

impl MySqlLeaveStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_requests(
        &self,
        clause: &str,
        bind: Option<u64>,
    ) -> StoreResult<Vec<LeaveRequest>> {
        let sql = format!("{}{}", REQUEST_SELECT, clause);
        let mut query = sqlx::query_as::<_, LeaveRequestRow>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        into_requests(rows)
    }
}

#[async_trait]
impl LeaveStore for MySqlLeaveStore {
    async fn active_leave_types(&self) -> StoreResult<Vec<LeaveType>> {
        let sql = format!("{} WHERE is_active = TRUE ORDER BY id", LEAVE_TYPE_SELECT);
        let rows = sqlx::query_as::<_, LeaveTypeRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(LeaveType::from).collect())
    }

    async fn leave_type(&self, id: u64) -> StoreResult<Option<LeaveType>> {
        let sql = format!("{} WHERE id = ?", LEAVE_TYPE_SELECT);
        let row = sqlx::query_as::<_, LeaveTypeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(LeaveType::from))
    }

    async fn create_request(&self, new: NewLeaveRequest) -> StoreResult<LeaveRequest> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (title, requester_id, employee_id, department, manager_id, leave_type_id,
                 start_date, end_date, total_days, is_partial_day, partial_day_hours,
                 request_comments, approval_status, submission_date, attachment_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.title())
        .bind(new.requester_id)
        .bind(&new.employee_id)
        .bind(&new.department)
        .bind(new.manager_id)
        .bind(new.leave_type_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.total_days)
        .bind(new.is_partial_day)
        .bind(new.partial_day_hours)
        .bind(&new.request_comments)
        .bind(ApprovalStatus::Pending.to_string())
        .bind(Utc::now())
        .bind(&new.attachment_url)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        self.request(id).await?.ok_or(StoreError::NotFound(id))
    }

    async fn requests_for_user(&self, requester_id: u64) -> StoreResult<Vec<LeaveRequest>> {
        self.fetch_requests(
            " WHERE r.requester_id = ? ORDER BY r.submission_date DESC",
            Some(requester_id),
        )
        .await
    }

    async fn approved_requests(&self) -> StoreResult<Vec<LeaveRequest>> {
        self.fetch_requests(" WHERE r.approval_status = 'Approved' ORDER BY r.start_date", None)
            .await
    }

    async fn all_requests(&self) -> StoreResult<Vec<LeaveRequest>> {
        self.fetch_requests(" ORDER BY r.submission_date DESC", None)
            .await
    }

    async fn request(&self, id: u64) -> StoreResult<Option<LeaveRequest>> {
        let mut rows = self.fetch_requests(" WHERE r.id = ?", Some(id)).await?;
        Ok(rows.pop())
    }

    async fn balance(
        &self,
        employee_id: u64,
        leave_type_id: u64,
    ) -> StoreResult<Option<LeaveBalance>> {
        let row = sqlx::query_as::<_, LeaveBalanceRow>(
            r#"
            SELECT b.id, b.employee_id, b.leave_type_id, t.title AS leave_type,
                   b.total_allowance, b.used_days, b.remaining_days, b.carry_over_days,
                   b.effective_date, b.expiration_date
            FROM leave_balances b
            LEFT JOIN leave_types t ON t.id = b.leave_type_id
            WHERE b.employee_id = ? AND b.leave_type_id = ?
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(leave_type_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(LeaveBalance::from))
    }

    async fn update_status(
        &self,
        id: u64,
        status: ApprovalStatus,
        comment: Option<&str>,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        // an absent comment leaves the previous one in place
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET approval_status = ?,
                approval_date = ?,
                approval_comments = COALESCE(?, approval_comments)
            WHERE id = ?
            "#,
        )
        .bind(status.to_string())
        .bind(at)
        .bind(comment)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn user_profile(&self, user_id: u64) -> StoreResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT id, display_name, email, department, manager_id
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UserProfile {
            id: row.id,
            display_name: row.display_name,
            email: row.email,
            department: row.department,
            manager_id: row.manager_id,
        }))
    }

    async fn credentials(&self, username: &str) -> StoreResult<Option<UserCredentials>> {
        let user = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, username, password, role_id, is_active
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
