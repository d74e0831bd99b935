pub mod administration;
pub mod calendar;
pub mod history;
pub mod leave_request;
pub mod leave_type;

use crate::config::{Config, MAX_PAGE_SIZE};
use crate::error::AppError;
use crate::leave::export::{CsvLayout, to_csv};
use crate::leave::filter::paginate;
use crate::model::leave_request::LeaveRequest;
use actix_web::HttpResponse;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<usize>,
    /// Items per page, defaults to the configured page size
    #[schema(example = 10)]
    pub per_page: Option<usize>,
}

impl PageQuery {
    /// `(page, per_page)` with the configured default and bounds applied.
    pub fn resolve(&self, config: &Config) -> (usize, usize) {
        let per_page = self
            .per_page
            .unwrap_or(config.views.items_per_page)
            .clamp(1, MAX_PAGE_SIZE);
        let page = self.page.unwrap_or(1).max(1);
        (page, per_page)
    }
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: usize,
    #[schema(example = 10)]
    pub per_page: usize,
    #[schema(example = 1)]
    pub total: usize,
}

impl LeaveListResponse {
    pub fn page_of(requests: Vec<LeaveRequest>, query: &PageQuery, config: &Config) -> Self {
        let (page, per_page) = query.resolve(config);
        let total = requests.len();
        LeaveListResponse {
            data: paginate(requests, page, per_page),
            page,
            per_page,
            total,
        }
    }
}

/// CSV download of `requests`, named after today's date.
pub fn csv_response(layout: CsvLayout, requests: &[LeaveRequest]) -> Result<HttpResponse, AppError> {
    let body = to_csv(layout, requests).map_err(|e| {
        tracing::error!(error = %e, "CSV export failed");
        AppError::LoadFailed("export")
    })?;
    let file_name = layout.file_name(Local::now().date_naive());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(body))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::ApprovalStatus;
    use crate::test_support::{config, request};

    fn query(page: Option<usize>, per_page: Option<usize>) -> PageQuery {
        PageQuery { page, per_page }
    }

    #[test]
    fn page_size_defaults_to_config_and_is_clamped() {
        let config = config();
        assert_eq!(query(None, None).resolve(&config), (1, 10));
        assert_eq!(query(Some(0), Some(0)).resolve(&config), (1, 1));
        assert_eq!(query(Some(3), Some(1000)).resolve(&config), (3, MAX_PAGE_SIZE));
        assert_eq!(MAX_PAGE_SIZE, 100);
    }

    #[test]
    fn page_of_reports_resolved_bounds_and_full_total() {
        let requests: Vec<LeaveRequest> = (1..=3)
            .map(|id| request(id, ApprovalStatus::Pending, 1.0))
            .collect();
        let page = LeaveListResponse::page_of(requests, &query(Some(2), Some(0)), &config());
        assert_eq!((page.page, page.per_page, page.total), (2, 1, 3));
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 2);
    }
}
