use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::model::leave_request::LeaveRequest;

/// Column layout of a CSV download, one per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    Administration,
    History,
    Calendar,
}

const DATE_FMT: &str = "%Y-%m-%d";

impl CsvLayout {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            CsvLayout::Administration => &[
                "Employee Name",
                "Leave Type",
                "Start Date",
                "End Date",
                "Total Days",
                "Status",
                "Comments",
            ],
            CsvLayout::History => &[
                "Leave Type",
                "Start Date",
                "End Date",
                "Days",
                "Status",
                "Submitted Date",
                "Comments",
            ],
            CsvLayout::Calendar => &[
                "Employee",
                "Leave Type",
                "Start Date",
                "End Date",
                "Status",
                "Days",
            ],
        }
    }

    /// Download name stamped with `today`.
    pub fn file_name(self, today: NaiveDate) -> String {
        let stem = match self {
            CsvLayout::Administration => "leave-requests",
            CsvLayout::History => "leave-history",
            CsvLayout::Calendar => "team-calendar",
        };
        format!("{}-{}.csv", stem, today.format(DATE_FMT))
    }

    fn row(self, r: &LeaveRequest) -> Vec<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let start = r.start_date.format(DATE_FMT).to_string();
        let end = r.end_date.format(DATE_FMT).to_string();
        let days = r.total_days.to_string();
        let status = r.approval_status.to_string();
        match self {
            CsvLayout::Administration => vec![
                text(&r.requester_name),
                text(&r.leave_type),
                start,
                end,
                days,
                status,
                text(&r.request_comments),
            ],
            CsvLayout::History => vec![
                text(&r.leave_type),
                start,
                end,
                days,
                status,
                r.submission_date.format(DATE_FMT).to_string(),
                text(&r.request_comments),
            ],
            CsvLayout::Calendar => vec![
                text(&r.requester_name),
                text(&r.leave_type),
                start,
                end,
                status,
                days,
            ],
        }
    }
}

/// Plain header line, then every field of every row double-quoted.
pub fn to_csv(layout: CsvLayout, requests: &[LeaveRequest]) -> Result<Vec<u8>, csv::Error> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    header.write_record(layout.headers())?;
    let buf = header
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buf);
    for request in requests {
        rows.write_record(layout.row(request))?;
    }
    rows.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
