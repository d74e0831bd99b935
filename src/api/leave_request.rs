use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::leave::validate::LeaveSubmission;
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};
use crate::service::approval::{self, Decision};
use crate::store::LeaveStore;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

/// Optional approver note sent with a decision.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DecisionBody {
    #[schema(example = "Enjoy your time off")]
    pub comment: Option<String>,
}

/* =========================
Submit leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = LeaveSubmission,
        description = "Leave request form",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Form rejected", body = Object, example = json!({
            "message": "Insufficient leave balance."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "message": "Failed to update leave request"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
#[instrument(name = "create_leave", skip(store, payload), fields(user_id = auth.user_id))]
pub async fn create_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    payload: web::Json<LeaveSubmission>,
) -> Result<HttpResponse, AppError> {
    // 1️⃣ shape of the form
    let form = payload.check_form()?;

    // 2️⃣ policy: leave type and balance
    let leave_type = store
        .leave_type(form.leave_type_id)
        .await
        .map_err(AppError::load("leave types"))?;
    let balance = store
        .balance(auth.user_id, form.leave_type_id)
        .await
        .map_err(AppError::load("leave balance"))?;
    let total_days = payload.check_policy(&form, leave_type.as_ref(), balance.as_ref())?;

    // 3️⃣ who is asking
    let profile = store
        .user_profile(auth.user_id)
        .await
        .map_err(AppError::load("user profile"))?;

    let leave_type_name = leave_type.map(|t| t.title).unwrap_or_default();
    let new = NewLeaveRequest {
        requester_id: auth.user_id,
        employee_id: auth.username.clone(),
        department: profile.as_ref().and_then(|p| p.department.clone()),
        manager_id: profile.as_ref().and_then(|p| p.manager_id),
        leave_type_id: form.leave_type_id,
        leave_type: leave_type_name,
        start_date: form.start_date,
        end_date: form.end_date,
        total_days,
        is_partial_day: form.partial_day_hours.is_some(),
        partial_day_hours: form.partial_day_hours,
        request_comments: payload.comments.clone().filter(|c| !c.trim().is_empty()),
        attachment_url: payload.attachment_url.clone(),
    };

    // 4️⃣ insert
    let created = store.create_request(new).await.map_err(|e| {
        tracing::error!(error = %e, user_id = auth.user_id, "Failed to create leave request");
        AppError::UpdateFailed("leave request")
    })?;

    tracing::info!(leave_id = created.id, total_days, "Leave request submitted");
    Ok(HttpResponse::Created().json(created))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let leave_id = path.into_inner();

    let leave = store
        .request(leave_id)
        .await
        .map_err(AppError::load("leave request"))?
        .ok_or_else(|| AppError::NotFound("Leave request not found".into()))?;

    if !auth.can_view(leave.requester_id) {
        return Err(AppError::Forbidden("Not your leave request"));
    }
    Ok(HttpResponse::Ok().json(leave))
}

async fn decide_one(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    leave_id: u64,
    decision: Decision,
    body: Option<web::Json<DecisionBody>>,
) -> Result<HttpResponse, AppError> {
    auth.require_approver()?;

    let comment = body.and_then(|b| b.into_inner().comment);
    approval::decide(store.get_ref(), leave_id, decision, comment.as_deref())
        .await
        .map_err(AppError::update("leave request"))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Request {} successfully", decision.past_tense()),
        "status": decision.status()
    })))
}

/* =========================
Approve leave (Manager/Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    request_body(content = DecisionBody, description = "Optional approver comment"),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Request approved successfully",
            "status": "Approved"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 500, description = "Failed to update leave request")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    path: web::Path<u64>,
    body: Option<web::Json<DecisionBody>>,
) -> Result<HttpResponse, AppError> {
    decide_one(auth, store, path.into_inner(), Decision::Approve, body).await
}

/* =========================
Reject leave (Manager/Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    request_body(content = DecisionBody, description = "Optional approver comment"),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Request rejected successfully",
            "status": "Rejected"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 500, description = "Failed to update leave request")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    path: web::Path<u64>,
    body: Option<web::Json<DecisionBody>>,
) -> Result<HttpResponse, AppError> {
    decide_one(auth, store, path.into_inner(), Decision::Reject, body).await
}
