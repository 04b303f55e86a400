//! Fiscal-year derivation.

use chrono::{Datelike, NaiveDateTime};

/// Returns the calendar year of a timestamp.
///
/// Budgets are keyed by calendar year. The year of an expense request's
/// creation timestamp decides which budget row a payment is checked against,
/// while recorded payments are bucketed by their own creation year.
#[must_use]
pub fn year_of(timestamp: NaiveDateTime) -> i32 {
    timestamp.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_year_of_plain_date() {
        assert_eq!(year_of(at(2024, 5, 10)), 2024);
    }

    #[test]
    fn test_year_of_year_boundary() {
        assert_eq!(year_of(at(2023, 12, 31)), 2023);
        assert_eq!(year_of(at(2024, 1, 1)), 2024);
    }
}
