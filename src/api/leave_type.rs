use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_type::LeaveType;
use crate::store::LeaveStore;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Leave types that can be picked on the form
#[utoipa::path(
    get,
    path = "/api/leave-types",
    responses(
        (status = 200, description = "Active leave types", body = [LeaveType]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to load leave types", body = Object, example = json!({
            "message": "Failed to load leave types"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn list_leave_types(
    _auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
) -> Result<HttpResponse, AppError> {
    let types = store
        .active_leave_types()
        .await
        .map_err(AppError::load("leave types"))?;
    Ok(HttpResponse::Ok().json(types))
}

/// Caller's balance for one leave type
#[utoipa::path(
    get,
    path = "/api/balance/{leave_type_id}",
    params(
        ("leave_type_id" = u64, Path, description = "Leave type to look up")
    ),
    responses(
        (status = 200, description = "Balance found", body = LeaveBalance),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No balance on record", body = Object, example = json!({
            "message": "No leave balance for this leave type"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn my_balance(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let balance = store
        .balance(auth.user_id, path.into_inner())
        .await
        .map_err(AppError::load("leave balance"))?
        .ok_or_else(|| AppError::NotFound("No leave balance for this leave type".into()))?;
    Ok(HttpResponse::Ok().json(balance))
}
