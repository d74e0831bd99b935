//! Shared fixtures for unit tests.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::auth::password::hash_password;
use crate::config::{Config, DefaultView, ViewSettings};
use crate::model::{
    leave_balance::LeaveBalance,
    leave_request::{ApprovalStatus, LeaveRequest},
    leave_type::LeaveType,
    role::Role,
    user::{UserCredentials, UserProfile},
};
use crate::store::memory::MemoryStore;

pub const SECRET: &str = "test-secret";
pub const PASSWORD: &str = "s3cret!";

/// Employee 10, "John Doe" of IT, 2026-03-02..=2026-03-03 annual leave.
pub fn request(id: u64, status: ApprovalStatus, total_days: f64) -> LeaveRequest {
    LeaveRequest {
        id,
        title: format!("Annual Leave - request {}", id),
        requester_id: 10,
        employee_id: "jdoe".into(),
        requester_name: Some("John Doe".into()),
        department: Some("IT".into()),
        manager_id: Some(3),
        manager_name: Some("Ann Smith".into()),
        leave_type_id: 1,
        leave_type: Some("Annual Leave".into()),
        color_code: None,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        total_days,
        is_partial_day: false,
        partial_day_hours: None,
        request_comments: None,
        approval_status: status,
        approval_date: None,
        approval_comments: None,
        submission_date: Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap(),
        attachment_url: None,
    }
}

pub fn leave_type(id: u64, title: &str) -> LeaveType {
    LeaveType {
        id,
        title: title.into(),
        description: None,
        is_active: true,
        requires_approval: true,
        max_days_per_request: None,
        requires_documentation: false,
        color_code: None,
        policy_url: None,
    }
}

pub fn balance(employee_id: u64, leave_type_id: u64, remaining_days: f64) -> LeaveBalance {
    LeaveBalance {
        id: employee_id * 100 + leave_type_id,
        employee_id,
        leave_type_id,
        leave_type: None,
        total_allowance: 20.0,
        used_days: 20.0 - remaining_days,
        remaining_days,
        carry_over_days: 0.0,
        effective_date: None,
        expiration_date: None,
    }
}

fn user(id: u64, username: &str, name: &str, role: Role) -> (UserProfile, UserCredentials) {
    (
        UserProfile {
            id,
            display_name: Some(name.into()),
            email: username.into(),
            department: Some("IT".into()),
            manager_id: Some(3),
        },
        UserCredentials {
            id,
            username: username.into(),
            password: hash_password(PASSWORD),
            role_id: role.id(),
            is_active: true,
        },
    )
}

/// Store with an employee (10, "jdoe"), a manager (3, "asmith"), two leave
/// types and a 5-day annual balance for the employee.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::default();
    {
        let mut types = store.leave_types.lock().unwrap();
        let mut annual = leave_type(1, "Annual Leave");
        annual.color_code = Some("#0078d4".into());
        annual.max_days_per_request = Some(10.0);
        types.push(annual);
        let mut sick = leave_type(2, "Sick Leave");
        sick.requires_documentation = true;
        types.push(sick);
        let mut retired = leave_type(3, "Sabbatical");
        retired.is_active = false;
        types.push(retired);
    }
    store.balances.lock().unwrap().push(balance(10, 1, 5.0));
    {
        let mut users = store.users.lock().unwrap();
        users.push(user(10, "jdoe", "John Doe", Role::Employee));
        users.push(user(3, "asmith", "Ann Smith", Role::Manager));
    }
    store
}

pub fn config() -> Config {
    Config {
        database_url: "mysql://unused".into(),
        jwt_secret: SECRET.into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 900,
        rate_login_per_min: 1000,
        rate_protected_per_min: 100_000,
        api_prefix: "/api".into(),
        log_dir: "logs".into(),
        log_level: tracing::Level::DEBUG,
        views: ViewSettings {
            title: "Leave Management".into(),
            default_view: DefaultView::Pending,
            items_per_page: 10,
            allow_bulk_actions: true,
            show_analytics: true,
            message_timeout_secs: 5,
        },
    }
}

/// `Authorization` header value for a freshly signed token.
pub fn bearer(user_id: u64, username: &str, role: Role) -> (&'static str, String) {
    let token = crate::auth::jwt::generate_access_token(
        user_id,
        username.into(),
        role.id(),
        SECRET,
        900,
    )
    .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

pub fn employee() -> (&'static str, String) {
    bearer(10, "jdoe", Role::Employee)
}

pub fn manager() -> (&'static str, String) {
    bearer(3, "asmith", Role::Manager)
}

pub fn peer() -> std::net::SocketAddr {
    std::net::SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Full routing stack over `$store` (an `Arc` of a store) with `$config`.
macro_rules! test_app {
    ($store:expr, $config:expr) => {{
        let store: std::sync::Arc<dyn crate::store::LeaveStore> = $store;
        let config: crate::config::Config = $config;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::new(config.clone()))
                .configure(|cfg| crate::routes::configure(cfg, config.clone())),
        )
        .await
    }};
    ($store:expr) => {
        crate::test_support::test_app!($store, crate::test_support::config())
    };
    () => {
        crate::test_support::test_app!(std::sync::Arc::new(crate::test_support::seeded_store()))
    };
}
pub(crate) use test_app;
