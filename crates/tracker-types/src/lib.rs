//! Tracker Types - Pure type definitions
//!
//! Domain records and the JSON request/response shapes of the exercise
//! tracker API. No async runtime or storage dependencies live here.

pub mod api;
pub mod exercise;
pub mod user;

pub use api::*;
pub use exercise::*;
pub use user::*;

use chrono::NaiveDate;

/// Wire format for dates accepted on input (`2024-01-31`)
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Long-form format used in responses (`Wed Jan 31 2024`)
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Render a calendar date the way API responses show it
pub fn display_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_pads_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(display_date(date), "Mon Jan 01 2024");
    }

    #[test]
    fn test_display_date_leap_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(display_date(date), "Thu Feb 29 2024");
    }
}
