use crate::api::csv_response;
use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::leave::calendar::{CalendarFilter, team_coverage, to_events};
use crate::leave::export::CsvLayout;
use crate::model::calendar_event::{CalendarEvent, TeamCoverage};
use crate::model::leave_request::LeaveRequest;
use crate::store::LeaveStore;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

/// Coverage is flagged critical below this percentage unless asked otherwise.
pub const DEFAULT_CRITICAL_BELOW: f64 = 50.0;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoverageQuery {
    /// Day to check
    pub date: NaiveDate,
    /// Headcount of the team
    #[param(example = 8)]
    pub team_size: u32,
    /// Percentage under which coverage is critical (default 50)
    pub critical_below: Option<f64>,
}

async fn approved(store: &dyn LeaveStore) -> Result<Vec<LeaveRequest>, AppError> {
    store
        .approved_requests()
        .await
        .map_err(AppError::load("calendar"))
}

/// Swagger doc for calendar_events endpoint
#[utoipa::path(
    get,
    path = "/api/calendar",
    params(CalendarFilter),
    responses(
        (status = 200, description = "Approved leave as calendar events", body = [CalendarEvent]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to load calendar")
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn calendar_events(
    _auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    filter: web::Query<CalendarFilter>,
) -> Result<HttpResponse, AppError> {
    let requests = filter.apply(approved(store.get_ref()).await?);
    Ok(HttpResponse::Ok().json(to_events(&requests)))
}

/// Swagger doc for calendar_export endpoint
#[utoipa::path(
    get,
    path = "/api/calendar/export",
    params(CalendarFilter),
    responses(
        (status = 200, description = "CSV of the calendar entries", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn calendar_export(
    _auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    filter: web::Query<CalendarFilter>,
) -> Result<HttpResponse, AppError> {
    let requests = filter.apply(approved(store.get_ref()).await?);
    csv_response(CsvLayout::Calendar, &requests)
}

/// Swagger doc for calendar_coverage endpoint
#[utoipa::path(
    get,
    path = "/api/calendar/coverage",
    params(CoverageQuery),
    responses(
        (status = 200, description = "Team coverage on the date", body = TeamCoverage),
        (status = 400, description = "Missing or malformed query"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn calendar_coverage(
    _auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    query: web::Query<CoverageQuery>,
) -> Result<HttpResponse, AppError> {
    let requests = approved(store.get_ref()).await?;
    let coverage = team_coverage(
        &requests,
        query.date,
        query.team_size,
        query.critical_below.unwrap_or(DEFAULT_CRITICAL_BELOW),
    );
    Ok(HttpResponse::Ok().json(coverage))
}
