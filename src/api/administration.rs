use crate::api::{LeaveListResponse, PageQuery, csv_response};
use crate::auth::auth::AuthUser;
use crate::config::{Config, DefaultView};
use crate::error::AppError;
use crate::leave::export::CsvLayout;
use crate::leave::filter::{LeaveFilter, sort_by_submission_desc};
use crate::leave::stats::{DaysBasis, LeaveStatistics};
use crate::leave::users::profiles_from_requests;
use crate::model::leave_request::LeaveRequest;
use crate::model::user::UserProfile;
use crate::service::approval::{self, Decision};
use crate::store::LeaveStore;
use actix_web::{HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

/// Dashboard tab, on top of the filter.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// pending, approved, rejected or all; defaults to the configured view
    pub view: Option<DefaultView>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// all (default) or approved_only
    pub basis: Option<DaysBasis>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "ids": [4, 7, 9],
    "action": "approve",
    "comment": "Approved in bulk"
}))]
pub struct BulkDecision {
    pub ids: Vec<u64>,
    pub action: Decision,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkResponse {
    pub message: String,
    pub applied: Vec<u64>,
    pub failed: Option<u64>,
    pub skipped: Vec<u64>,
}

/// Every request matching `filter`, newest submission first.
async fn filtered(store: &dyn LeaveStore, filter: &LeaveFilter) -> Result<Vec<LeaveRequest>, AppError> {
    let all = store
        .all_requests()
        .await
        .map_err(AppError::load("leave requests"))?;
    let mut requests = filter.apply(all);
    sort_by_submission_desc(&mut requests);
    Ok(requests)
}

/// Swagger doc for leave_list endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter, ViewQuery, PageQuery),
    responses(
        (status = 200, description = "Filtered leave requests", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Failed to load leave requests")
    ),
    security(("bearer_auth" = [])),
    tag = "Administration"
)]
pub async fn leave_list(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    filter: web::Query<LeaveFilter>,
    view: web::Query<ViewQuery>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    auth.require_approver()?;

    let tab = view.view.unwrap_or(config.views.default_view).status();
    let requests: Vec<LeaveRequest> = filtered(store.get_ref(), &filter)
        .await?
        .into_iter()
        .filter(|r| tab.is_none_or(|s| s == r.approval_status))
        .collect();

    Ok(HttpResponse::Ok().json(LeaveListResponse::page_of(requests, &page, &config)))
}

/// Swagger doc for leave_statistics endpoint
#[utoipa::path(
    get,
    path = "/api/leave/statistics",
    params(LeaveFilter, StatsQuery),
    responses(
        (status = 200, description = "Statistics of the filtered set", body = LeaveStatistics),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden or analytics disabled"),
        (status = 500, description = "Failed to load leave requests")
    ),
    security(("bearer_auth" = [])),
    tag = "Administration"
)]
pub async fn leave_statistics(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    filter: web::Query<LeaveFilter>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    auth.require_approver()?;
    if !config.views.show_analytics {
        return Err(AppError::Forbidden("Analytics are disabled"));
    }

    let requests = filtered(store.get_ref(), &filter).await?;
    let stats = LeaveStatistics::from_requests(&requests, query.basis.unwrap_or_default());
    Ok(HttpResponse::Ok().json(stats))
}

/// Swagger doc for leave_export endpoint
#[utoipa::path(
    get,
    path = "/api/leave/export",
    params(LeaveFilter),
    responses(
        (status = 200, description = "CSV of the filtered set", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Failed to load leave requests")
    ),
    security(("bearer_auth" = [])),
    tag = "Administration"
)]
pub async fn leave_export(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    filter: web::Query<LeaveFilter>,
) -> Result<HttpResponse, AppError> {
    auth.require_approver()?;
    let requests = filtered(store.get_ref(), &filter).await?;
    csv_response(CsvLayout::Administration, &requests)
}

/* =========================
Bulk approve / reject
========================= */
/// Swagger doc for bulk_decide endpoint
#[utoipa::path(
    post,
    path = "/api/leave/bulk",
    request_body = BulkDecision,
    responses(
        (status = 200, description = "All requests updated", body = BulkResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden or bulk actions disabled"),
        (status = 500, description = "Stopped at the first failure; earlier updates stay applied", body = BulkResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Administration"
)]
#[instrument(name = "bulk_decide", skip(store, config, payload), fields(user_id = auth.user_id))]
pub async fn bulk_decide(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    payload: web::Json<BulkDecision>,
) -> Result<HttpResponse, AppError> {
    auth.require_approver()?;
    if !config.views.allow_bulk_actions {
        return Err(AppError::Forbidden("Bulk actions are disabled"));
    }
    if payload.ids.is_empty() {
        return Err(AppError::Validation("No leave requests selected".into()));
    }

    let outcome = approval::decide_many(
        store.get_ref(),
        &payload.ids,
        payload.action,
        payload.comment.as_deref(),
    )
    .await;

    match outcome.failed {
        None => {
            tracing::info!(count = outcome.applied.len(), "Bulk decision applied");
            Ok(HttpResponse::Ok().json(BulkResponse {
                message: format!(
                    "{} requests {} successfully",
                    outcome.applied.len(),
                    payload.action.past_tense()
                ),
                applied: outcome.applied,
                failed: None,
                skipped: outcome.skipped,
            }))
        }
        Some(failure) => {
            let err = AppError::update("leave request")(failure.error);
            Ok(HttpResponse::build(err.status_code()).json(BulkResponse {
                message: err.to_string(),
                applied: outcome.applied,
                failed: Some(failure.id),
                skipped: outcome.skipped,
            }))
        }
    }
}

/// Swagger doc for leave_users endpoint
#[utoipa::path(
    get,
    path = "/api/leave/users",
    responses(
        (status = 200, description = "Distinct requesters", body = [UserProfile]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Administration"
)]
pub async fn leave_users(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
) -> Result<HttpResponse, AppError> {
    auth.require_approver()?;
    let requests = store
        .all_requests()
        .await
        .map_err(AppError::load("users"))?;
    Ok(HttpResponse::Ok().json(profiles_from_requests(&requests)))
}
