//! Maps a period kind and reference date onto period keys and their calendar bounds.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::core::calendar::{self, calendar_date, days_in_month};
use crate::domain::{PeriodBounds, PeriodKey, PeriodKind, MAX_WEEK};
use crate::errors::{BudgetError, Result};

/// Week assumed for the last week of the prior year when stepping back from week 1.
/// Years with 53 weeks are not accounted for.
pub const PREVIOUS_YEAR_LAST_WEEK: u32 = 52;

pub struct PeriodResolver;

impl PeriodResolver {
    /// Resolves the period of `kind` that `reference` falls in.
    pub fn resolve_current(kind: PeriodKind, reference: NaiveDate) -> PeriodKey {
        match kind {
            PeriodKind::Monthly => PeriodKey::monthly(reference.year(), reference.month()),
            PeriodKind::Weekly => PeriodKey::weekly(reference.year(), week_of_year(reference)),
            PeriodKind::Yearly => PeriodKey::yearly(reference.year()),
        }
    }

    /// Inclusive bounds of a period.
    ///
    /// Weeks use a fixed origin: week `n` starts `(n - 1) * 7` days after January 1st,
    /// independent of the weekday convention used by [`Self::resolve_current`].
    pub fn bounds_for(key: &PeriodKey) -> Result<PeriodBounds> {
        key.validate()?;
        let (first, last) = match (key.kind, key.month, key.week) {
            (PeriodKind::Monthly, Some(month), _) => {
                let last_day = days_in_month(key.year, month).ok_or_else(|| {
                    BudgetError::InvalidPeriod(format!("no month {month} in {}", key.year))
                })?;
                (
                    calendar_date(key.year, month, 1)?,
                    calendar_date(key.year, month, last_day)?,
                )
            }
            (PeriodKind::Weekly, _, Some(week)) => {
                let first = calendar_date(key.year, 1, 1)? + Duration::days((week as i64 - 1) * 7);
                (first, first + Duration::days(6))
            }
            (PeriodKind::Yearly, _, _) => (
                calendar_date(key.year, 1, 1)?,
                calendar_date(key.year, 12, 31)?,
            ),
            _ => return Err(BudgetError::InvalidPeriod(key.to_string())),
        };
        Ok(PeriodBounds {
            start: calendar::start_of_day(first)?,
            end: calendar::end_of_day(last)?,
        })
    }

    /// The period immediately before `key`.
    pub fn previous_of(key: &PeriodKey) -> PeriodKey {
        match key.kind {
            PeriodKind::Monthly => match key.month {
                Some(month) if month > 1 => PeriodKey::monthly(key.year, month - 1),
                _ => PeriodKey::monthly(key.year - 1, 12),
            },
            PeriodKind::Weekly => match key.week {
                Some(week) if week > 1 => PeriodKey::weekly(key.year, week - 1),
                _ => PeriodKey::weekly(key.year - 1, PREVIOUS_YEAR_LAST_WEEK),
            },
            PeriodKind::Yearly => PeriodKey::yearly(key.year - 1),
        }
    }

    /// Start of the day `months` calendar months before `start`.
    pub fn months_before(start: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
        let date = calendar::shift_months(start.date_naive(), -(months as i32)).ok_or_else(|| {
            BudgetError::InvalidPeriod(format!("cannot step {months} months back from {start}"))
        })?;
        calendar::start_of_day(date)
    }
}

/// Sunday-start week number: `ceil((day_of_year + jan1_weekday) / 7)`, capped at 53.
fn week_of_year(reference: NaiveDate) -> u32 {
    let weekday = reference.weekday().num_days_from_sunday();
    let jan1_offset = (weekday + 7 - reference.ordinal0() % 7) % 7;
    ((reference.ordinal() + jan1_offset + 6) / 7).min(MAX_WEEK)
}
