use crate::api::{LeaveListResponse, PageQuery, csv_response};
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::AppError;
use crate::leave::export::CsvLayout;
use crate::leave::filter::{LeaveFilter, sort_by_submission_desc};
use crate::leave::stats::{DaysBasis, LeaveStatistics};
use crate::model::leave_request::LeaveRequest;
use crate::store::LeaveStore;
use actix_web::{HttpResponse, web};

/// The caller's own requests matching `filter`, newest first.
async fn my_requests(
    store: &dyn LeaveStore,
    auth: &AuthUser,
    filter: &LeaveFilter,
) -> Result<Vec<LeaveRequest>, AppError> {
    let mine = store
        .requests_for_user(auth.user_id)
        .await
        .map_err(AppError::load("leave history"))?;
    let mut requests = filter.apply(mine);
    sort_by_submission_desc(&mut requests);
    Ok(requests)
}

/// Swagger doc for my_leave endpoint
#[utoipa::path(
    get,
    path = "/api/leave/mine",
    params(LeaveFilter, PageQuery),
    responses(
        (status = 200, description = "Caller's leave history", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to load leave history")
    ),
    security(("bearer_auth" = [])),
    tag = "History"
)]
pub async fn my_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    filter: web::Query<LeaveFilter>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let requests = my_requests(store.get_ref(), &auth, &filter).await?;
    Ok(HttpResponse::Ok().json(LeaveListResponse::page_of(requests, &page, &config)))
}

/// Swagger doc for my_statistics endpoint
#[utoipa::path(
    get,
    path = "/api/leave/mine/statistics",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Statistics of the caller's history; days count approved requests only", body = LeaveStatistics),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Analytics disabled")
    ),
    security(("bearer_auth" = [])),
    tag = "History"
)]
pub async fn my_statistics(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    filter: web::Query<LeaveFilter>,
) -> Result<HttpResponse, AppError> {
    if !config.views.show_analytics {
        return Err(AppError::Forbidden("Analytics are disabled"));
    }
    let requests = my_requests(store.get_ref(), &auth, &filter).await?;
    Ok(HttpResponse::Ok().json(LeaveStatistics::from_requests(&requests, DaysBasis::ApprovedOnly)))
}

/// Swagger doc for my_export endpoint
#[utoipa::path(
    get,
    path = "/api/leave/mine/export",
    params(LeaveFilter),
    responses(
        (status = 200, description = "CSV of the caller's history", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "History"
)]
pub async fn my_export(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    filter: web::Query<LeaveFilter>,
) -> Result<HttpResponse, AppError> {
    let requests = my_requests(store.get_ref(), &auth, &filter).await?;
    csv_response(CsvLayout::History, &requests)
}

#[cfg(test)]
mod tests {
    use crate::model::leave_request::ApprovalStatus;
    use crate::test_support::{employee, peer, request, seeded_store, test_app};
    use actix_web::test;
    use chrono::Duration;
    use serde_json::Value;
    use std::sync::Arc;

    fn store() -> Arc<crate::store::memory::MemoryStore> {
        let store = Arc::new(seeded_store());
        {
            let mut requests = store.requests.lock().unwrap();
            let mut later = request(2, ApprovalStatus::Approved, 3.0);
            later.submission_date += Duration::days(3);
            let mut someone_else = request(3, ApprovalStatus::Approved, 4.0);
            someone_else.requester_id = 20;
            let mut rejected = request(4, ApprovalStatus::Rejected, 1.0);
            rejected.submission_date += Duration::days(1);
            requests.extend([request(1, ApprovalStatus::Pending, 2.0), later, someone_else, rejected]);
        }
        store
    }

    fn get(uri: &str) -> test::TestRequest {
        test::TestRequest::get()
            .uri(uri)
            .peer_addr(peer())
            .insert_header(employee())
    }

    #[actix_web::test]
    async fn history_is_own_requests_newest_first() {
        let app = test_app!(store());
        let body: Value = test::call_and_read_body_json(&app, get("/api/leave/mine").to_request()).await;
        let ids: Vec<u64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 4, 1]);

        let body: Value =
            test::call_and_read_body_json(&app, get("/api/leave/mine?status=Rejected").to_request()).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["id"], 4);
    }

    #[actix_web::test]
    async fn history_statistics_count_approved_days_only() {
        let app = test_app!(store());
        let body: Value =
            test::call_and_read_body_json(&app, get("/api/leave/mine/statistics").to_request()).await;
        assert_eq!(body["total_requests"], 3);
        assert_eq!(body["total_days_requested"], 3.0);
        assert_eq!(body["rejected_requests"], 1);
    }

    #[actix_web::test]
    async fn history_export_uses_history_columns() {
        let app = test_app!(store());
        let body = test::call_and_read_body(&app, get("/api/leave/mine/export").to_request()).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Leave Type,Start Date,End Date,Days,Status,Submitted Date,Comments")
        );
        assert_eq!(lines.count(), 3);
    }
}
