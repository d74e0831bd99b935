use chrono::NaiveDate;
use derive_more::Display;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::leave::days::{HOURS_PER_DAY, calculate_total_days, is_valid_partial_hours};
use crate::model::{leave_balance::LeaveBalance, leave_type::LeaveType};

/// Submission form as posted by an employee.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "leave_type_id": 1,
    "start_date": "2026-03-02",
    "end_date": "2026-03-04",
    "is_partial_day": false,
    "comments": "Family trip"
}))]
pub struct LeaveSubmission {
    pub leave_type_id: Option<u64>,
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_partial_day: bool,
    /// 0.5 to 8, defaults to a full 8 hours
    pub partial_day_hours: Option<f64>,
    pub comments: Option<String>,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ValidationError {
    #[display(fmt = "Please select a leave type.")]
    MissingLeaveType,
    #[display(fmt = "Please select start and end dates.")]
    MissingDates,
    #[display(fmt = "End date must be after start date.")]
    EndBeforeStart,
    #[display(fmt = "Partial day hours must be between 0.5 and 8.")]
    PartialHoursOutOfRange,
    #[display(fmt = "Selected leave type is not available.")]
    LeaveTypeUnavailable,
    #[display(fmt = "Requests of this leave type are limited to {} days.", _0)]
    ExceedsTypeCap(f64),
    #[display(fmt = "This leave type requires supporting documentation.")]
    DocumentationRequired,
    #[display(fmt = "Insufficient leave balance.")]
    InsufficientBalance,
}

/// Form fields that passed the shape checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedForm {
    pub leave_type_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub partial_day_hours: Option<f64>,
}

impl CheckedForm {
    pub fn total_days(&self) -> f64 {
        calculate_total_days(self.start_date, self.end_date, self.partial_day_hours)
    }
}

impl LeaveSubmission {
    /// Checks that need no stored data: selection, dates and hours.
    pub fn check_form(&self) -> Result<CheckedForm, ValidationError> {
        let leave_type_id = self.leave_type_id.ok_or(ValidationError::MissingLeaveType)?;
        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ValidationError::MissingDates),
        };
        if start_date > end_date {
            return Err(ValidationError::EndBeforeStart);
        }

        let partial_day_hours = if self.is_partial_day {
            let hours = self.partial_day_hours.unwrap_or(HOURS_PER_DAY);
            if !is_valid_partial_hours(hours) {
                return Err(ValidationError::PartialHoursOutOfRange);
            }
            Some(hours)
        } else {
            None
        };

        Ok(CheckedForm {
            leave_type_id,
            start_date,
            end_date,
            partial_day_hours,
        })
    }

    /// Policy checks against the chosen leave type and the employee's
    /// balance; returns the day count to record.
    ///
    /// The balance is read before the insert, so two concurrent submissions
    /// can both pass.
    pub fn check_policy(
        &self,
        form: &CheckedForm,
        leave_type: Option<&LeaveType>,
        balance: Option<&LeaveBalance>,
    ) -> Result<f64, ValidationError> {
        let leave_type = leave_type
            .filter(|t| t.is_active)
            .ok_or(ValidationError::LeaveTypeUnavailable)?;
        let total_days = form.total_days();

        if let Some(cap) = leave_type.max_days_per_request {
            if total_days > cap {
                return Err(ValidationError::ExceedsTypeCap(cap));
            }
        }
        let has_attachment = self
            .attachment_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        if leave_type.requires_documentation && !has_attachment {
            return Err(ValidationError::DocumentationRequired);
        }
        if balance.is_some_and(|b| total_days > b.remaining_days) {
            return Err(ValidationError::InsufficientBalance);
        }

        Ok(total_days)
    }
}
