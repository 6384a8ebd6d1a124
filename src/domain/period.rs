use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};

/// Enumerates the calendar cadences a budget can be declared for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodKind {
    Monthly,
    Weekly,
    Yearly,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodKind::Monthly => "MONTHLY",
            PeriodKind::Weekly => "WEEKLY",
            PeriodKind::Yearly => "YEARLY",
        };
        f.write_str(label)
    }
}

/// Identifies one concrete period instance, e.g. June 2024 or week 5 of 2024.
///
/// `month` is present only for monthly keys and `week` only for weekly keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey {
    pub kind: PeriodKind,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
}

pub const MAX_WEEK: u32 = 53;

impl PeriodKey {
    pub fn monthly(year: i32, month: u32) -> Self {
        Self {
            kind: PeriodKind::Monthly,
            year,
            month: Some(month),
            week: None,
        }
    }

    pub fn weekly(year: i32, week: u32) -> Self {
        Self {
            kind: PeriodKind::Weekly,
            year,
            month: None,
            week: Some(week),
        }
    }

    pub fn yearly(year: i32) -> Self {
        Self {
            kind: PeriodKind::Yearly,
            year,
            month: None,
            week: None,
        }
    }

    /// Checks that the optional fields line up with `kind` and sit in range.
    pub fn validate(&self) -> Result<()> {
        match (self.kind, self.month, self.week) {
            (PeriodKind::Monthly, Some(month), None) if (1..=12).contains(&month) => Ok(()),
            (PeriodKind::Weekly, None, Some(week)) if (1..=MAX_WEEK).contains(&week) => Ok(()),
            (PeriodKind::Yearly, None, None) => Ok(()),
            _ => Err(BudgetError::InvalidPeriod(format!(
                "{} key has month {:?} and week {:?}",
                self.kind, self.month, self.week
            ))),
        }
    }

    /// Short human label: `2024-06`, `2024-W05`, or `2024`.
    pub fn label(&self) -> String {
        match (self.kind, self.month, self.week) {
            (PeriodKind::Monthly, Some(month), _) => format!("{}-{:02}", self.year, month),
            (PeriodKind::Weekly, _, Some(week)) => format!("{}-W{:02}", self.year, week),
            _ => self.year.to_string(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Inclusive instant range covering a period, start-of-day to 23:59:59.999.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodBounds {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}
