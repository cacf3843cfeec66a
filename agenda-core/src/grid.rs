//! Month-grid math for calendar rendering.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{AgendaError, AgendaResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The year/month pair the calendar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> AgendaResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AgendaError::Validation(format!(
                "invalid month {month}, expected 1-12"
            )));
        }
        Ok(MonthCursor { year, month })
    }

    /// The month containing today, in local time.
    pub fn current() -> Self {
        MonthCursor::containing(Local::now().date_naive())
    }

    /// The month a date falls in. Infallible: a date's month is in range.
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` argument.
    pub fn parse(s: &str) -> AgendaResult<Self> {
        let invalid =
            || AgendaError::Validation(format!("invalid month '{s}', expected YYYY-MM"));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthCursor::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            MonthCursor {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthCursor {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthCursor {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthCursor {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // Month is validated on construction, so this cannot fail.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// The date for `day` (1-based) in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Header label, e.g. "March 2025".
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn grid(&self) -> MonthGrid {
        let first = self.first_day();
        let next_first = self.next().first_day();

        MonthGrid {
            // Sunday-first layout: day 1 lands in column weekday-from-Sunday.
            leading_blanks: first.weekday().num_days_from_sunday(),
            days_in_month: (next_first - first).num_days() as u32,
        }
    }
}

/// Cell layout for one month: blank cells before day 1, then the days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub leading_blanks: u32,
    pub days_in_month: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_february_has_29_days() {
        let grid = MonthCursor::new(2024, 2).unwrap().grid();
        assert_eq!(grid.days_in_month, 29);
        // 2024-02-01 is a Thursday.
        assert_eq!(grid.leading_blanks, 4);
    }

    #[test]
    fn non_leap_february_has_28_days() {
        let grid = MonthCursor::new(2025, 2).unwrap().grid();
        assert_eq!(grid.days_in_month, 28);
    }

    #[test]
    fn leading_blanks_match_first_weekday() {
        // 2025-06-01 is a Sunday.
        assert_eq!(MonthCursor::new(2025, 6).unwrap().grid().leading_blanks, 0);
        // 2025-03-01 is a Saturday.
        assert_eq!(MonthCursor::new(2025, 3).unwrap().grid().leading_blanks, 6);
    }

    #[test]
    fn every_month_of_a_year_lays_out_consistently() {
        for month in 1..=12 {
            let cursor = MonthCursor::new(2025, month).unwrap();
            let grid = cursor.grid();
            assert!(grid.leading_blanks < 7);
            assert!((28..=31).contains(&grid.days_in_month));
            assert!(cursor.date(grid.days_in_month).is_some());
            assert!(cursor.date(grid.days_in_month + 1).is_none());
        }
    }

    #[test]
    fn navigation_rolls_over_year_boundaries() {
        let january = MonthCursor::new(2025, 1).unwrap();
        assert_eq!(january.prev(), MonthCursor::new(2024, 12).unwrap());

        let december = MonthCursor::new(2025, 12).unwrap();
        assert_eq!(december.next(), MonthCursor::new(2026, 1).unwrap());
    }

    #[test]
    fn parses_year_month_argument() {
        let cursor = MonthCursor::parse("2025-03").unwrap();
        assert_eq!(cursor.label(), "March 2025");

        assert!(MonthCursor::parse("2025-13").is_err());
        assert!(MonthCursor::parse("march").is_err());
    }
}
