use crate::api::administration::{BulkDecision, BulkResponse};
use crate::api::leave_request::DecisionBody;
use crate::api::{LeaveListResponse, PageQuery};
use crate::auth::auth::AuthUser;
use crate::config::{DefaultView, ViewSettings};
use crate::leave::filter::LeaveFilter;
use crate::leave::stats::{DaysBasis, LeaveStatistics};
use crate::leave::validate::LeaveSubmission;
use crate::model::calendar_event::{CalendarEvent, CalendarEventProps, TeamCoverage};
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{ApprovalStatus, LeaveRequest};
use crate::model::leave_type::LeaveType;
use crate::model::role::Role;
use crate::model::user::UserProfile;
use crate::models::{LoginReqDto, LoginResponse};
use crate::service::approval::Decision;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Portal API",
        version = "1.0.0",
        description = r#"
## Leave Management

Employees submit leave requests and follow their history; managers review,
approve or reject them one by one or in bulk, and look at the team calendar.

### 🔹 Views
- **Leave** : submission form, leave types, balances, single approve/reject
- **Administration** : filtered dashboard, statistics, CSV export, bulk actions
- **History** : the caller's own requests, statistics and CSV export
- **Calendar** : approved leave as calendar events, team coverage

### 🔐 Security
Every endpoint except `/auth/login` needs a **JWT Bearer** token.
Only **Admin** and **Manager** roles can approve, reject or use the dashboard.

### 📦 Response Format
- JSON bodies, errors as `{"message": "..."}`
- Lists are paginated; exports are CSV attachments

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::me,
        crate::auth::handlers::settings,

        crate::api::leave_type::list_leave_types,
        crate::api::leave_type::my_balance,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::administration::leave_list,
        crate::api::administration::leave_statistics,
        crate::api::administration::leave_export,
        crate::api::administration::bulk_decide,
        crate::api::administration::leave_users,

        crate::api::history::my_leave,
        crate::api::history::my_statistics,
        crate::api::history::my_export,

        crate::api::calendar::calendar_events,
        crate::api::calendar::calendar_export,
        crate::api::calendar::calendar_coverage
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            AuthUser,
            Role,
            ViewSettings,
            DefaultView,
            LeaveType,
            LeaveBalance,
            LeaveRequest,
            ApprovalStatus,
            LeaveSubmission,
            LeaveFilter,
            PageQuery,
            LeaveListResponse,
            DecisionBody,
            Decision,
            BulkDecision,
            BulkResponse,
            LeaveStatistics,
            DaysBasis,
            UserProfile,
            CalendarEvent,
            CalendarEventProps,
            TeamCoverage
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and caller context"),
        (name = "Leave", description = "Leave submission and decisions"),
        (name = "Administration", description = "Approval dashboard for managers"),
        (name = "History", description = "Caller's own leave history"),
        (name = "Calendar", description = "Team calendar and coverage"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
