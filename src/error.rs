use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, From};
use serde_json::json;

use crate::leave::validate::ValidationError;

/// Failure of a storage call.
#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
    #[from(ignore)]
    #[display(fmt = "record {} not found", _0)]
    NotFound(u64),
    #[from(ignore)]
    #[display(fmt = "unreadable record: {}", _0)]
    Corrupt(String),
}

impl std::error::Error for StoreError {}

/// Error surfaced to API callers as `{"message": ...}`.
///
/// Storage failures are only told apart as "load" or "update" failures.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Failed to load {}", _0)]
    LoadFailed(&'static str),
    #[display(fmt = "Failed to update {}", _0)]
    UpdateFailed(&'static str),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "{}", _0)]
    Forbidden(&'static str),
    #[display(fmt = "{}", _0)]
    Unauthorized(&'static str),
}

impl std::error::Error for AppError {}

impl AppError {
    /// Logs `err` and maps it to a load failure of `what`.
    pub fn load(what: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |err| {
            tracing::error!(error = %err, what, "Load failed");
            AppError::LoadFailed(what)
        }
    }

    /// Logs `err` and maps it to an update failure of `what`; a missing record stays a 404.
    pub fn update(what: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |err| match err {
            StoreError::NotFound(id) => {
                tracing::warn!(leave_id = id, what, "Update target missing");
                AppError::NotFound(format!("Leave request {} not found", id))
            }
            other => {
                tracing::error!(error = %other, what, "Update failed");
                AppError::UpdateFailed(what)
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::LoadFailed(_) | AppError::UpdateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn store_failures_become_generic_messages() {
        let err = AppError::load("leave requests")(StoreError::Corrupt("bad status".into()));
        assert_eq!(err.to_string(), "Failed to load leave requests");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::update("leave request")(StoreError::Corrupt("x".into()));
        assert_eq!(err.to_string(), "Failed to update leave request");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn missing_record_on_update_is_not_found_and_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let err = tracing::subscriber::with_default(subscriber, || {
            AppError::update("leave request")(StoreError::NotFound(42))
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Leave request 42 not found");

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"));
        assert!(logged.contains("Update target missing"));
        assert!(logged.contains("leave_id=42"));
    }
}
