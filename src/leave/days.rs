use chrono::NaiveDate;

/// Hours in a full working day.
pub const HOURS_PER_DAY: f64 = 8.0;
pub const MIN_PARTIAL_HOURS: f64 = 0.5;

/// Number of leave days between `start` and `end`, both included.
///
/// When the range is a single day and `partial_hours` is given the result is
/// the fraction `hours / 8`. Weekends and holidays count as leave days. An
/// inverted range is not rejected here and yields zero or less.
pub fn calculate_total_days(start: NaiveDate, end: NaiveDate, partial_hours: Option<f64>) -> f64 {
    let days = (end - start).num_days() + 1;
    match partial_hours {
        Some(hours) if days == 1 => hours / HOURS_PER_DAY,
        _ => days as f64,
    }
}

pub fn is_valid_partial_hours(hours: f64) -> bool {
    (MIN_PARTIAL_HOURS..=HOURS_PER_DAY).contains(&hours)
}
