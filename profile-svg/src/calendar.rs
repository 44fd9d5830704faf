// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Human calendar differences between two dates.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::Error;

/// Elapsed whole years, months and days between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarSpan {
    /// Whole years.
    pub years:  i32,
    /// Whole months after the years, `0..=11`.
    pub months: i32,
    /// Remaining days after the months.
    pub days:   i32
}

impl fmt::Display for CalendarSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            plural(self.years, "year"),
            plural(self.months, "month"),
            plural(self.days, "day")
        )
    }
}

/// Computes the calendar difference between `a` and `b`.
///
/// Operands are swapped when `a` is later than `b`, so the result is the
/// same in both orders. Components are subtracted field by field. A
/// negative day count borrows the length of the month preceding the later
/// date, walking further back while the count stays negative; a negative
/// month count borrows twelve months from the years.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use profile_svg::calendar_diff;
///
/// let origin = NaiveDate::from_ymd_opt(2001, 8, 6,).expect("valid date",);
/// let now = NaiveDate::from_ymd_opt(2021, 8, 6,).expect("valid date",);
/// assert_eq!(calendar_diff(origin, now,).to_string(), "20 years, 0 months, 0 days");
/// ```
pub fn calendar_diff(a: NaiveDate, b: NaiveDate) -> CalendarSpan {
    let (from, to) = if b < a { (b, a) } else { (a, b) };

    let mut years = to.year() - from.year();
    let mut months = to.month() as i32 - from.month() as i32;
    let mut days = to.day() as i32 - from.day() as i32;

    let mut borrow_from = to;
    while days < 0 {
        let Some(previous_month_end) = borrow_from
            .with_day(1)
            .and_then(|first| first.pred_opt())
        else {
            break;
        };
        days += previous_month_end.day() as i32;
        months -= 1;
        borrow_from = previous_month_end;
    }

    while months < 0 {
        months += 12;
        years -= 1;
    }

    CalendarSpan {
        years,
        months,
        days
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::Config`] naming the expected format when the value does
/// not parse.
pub fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| Error::config(format!("invalid date \"{trimmed}\". Use YYYY-MM-DD.")))
}

fn plural(count: i32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
