//! Calendar arithmetic on UTC dates.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::errors::{BudgetError, Result};

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    let last_current = first_next - Duration::days(1);
    Some(last_current.day())
}

/// Moves a date by whole calendar months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        BudgetError::InvalidPeriod(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
    })
}

pub fn start_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .ok_or_else(|| BudgetError::InvalidPeriod(format!("no start of day for {date}")))
}

/// Last representable millisecond of the day, 23:59:59.999.
pub fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .ok_or_else(|| BudgetError::InvalidPeriod(format!("no end of day for {date}")))
}
