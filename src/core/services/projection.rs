use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::core::calendar::days_in_month;
use crate::domain::{PeriodKind, Projection};

pub struct ProjectionEstimator;

impl ProjectionEstimator {
    /// Linear full-month forecast from the spend pace so far.
    ///
    /// Applies only to a monthly period that is the month of `today` and has a positive
    /// budget. `projected_over_by` is set only when the forecast exceeds the budget.
    /// A forecast that overflows the decimal range yields no projection.
    pub fn project(
        kind: PeriodKind,
        year: i32,
        month: Option<u32>,
        budget_amount: Option<Decimal>,
        spent_so_far: Decimal,
        today: NaiveDate,
    ) -> Option<Projection> {
        if kind != PeriodKind::Monthly {
            return None;
        }
        let month = month?;
        if today.year() != year || today.month() != month {
            return None;
        }
        let budget = budget_amount.filter(|amount| *amount > Decimal::ZERO)?;
        let days = days_in_month(year, month)?;
        let day = today.day();
        if !(1..=days).contains(&day) {
            return None;
        }

        let projected_spend = spent_so_far
            .checked_div(Decimal::from(day))?
            .checked_mul(Decimal::from(days))?;
        let over_by = projected_spend.checked_sub(budget)?;
        Some(Projection {
            projected_spend,
            projected_over_by: (over_by > Decimal::ZERO).then_some(over_by),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn extrapolates_daily_pace() {
        let projection = ProjectionEstimator::project(
            PeriodKind::Monthly,
            2024,
            Some(6),
            Some(dec!(10000)),
            dec!(5700),
            june(15),
        )
        .expect("current month projection");
        assert_eq!(projection.projected_spend, dec!(11400));
        assert_eq!(projection.projected_over_by, Some(dec!(1400)));
    }

    #[test]
    fn under_budget_pace_has_no_overage() {
        let projection = ProjectionEstimator::project(
            PeriodKind::Monthly,
            2024,
            Some(6),
            Some(dec!(10000)),
            dec!(3000),
            june(30),
        )
        .unwrap();
        assert_eq!(projection.projected_spend, dec!(3000));
        assert_eq!(projection.projected_over_by, None);
    }

    #[test]
    fn overflowing_pace_has_no_projection() {
        let spent = dec!(10000000000000000000000000000);
        assert!(ProjectionEstimator::project(
            PeriodKind::Monthly,
            2024,
            Some(6),
            Some(dec!(1000)),
            spent,
            june(1)
        )
        .is_none());
    }

    #[test]
    fn gated_on_kind_month_and_budget() {
        let spent = dec!(100);
        assert!(ProjectionEstimator::project(
            PeriodKind::Weekly,
            2024,
            None,
            Some(dec!(500)),
            spent,
            june(3)
        )
        .is_none());
        assert!(ProjectionEstimator::project(
            PeriodKind::Monthly,
            2024,
            Some(5),
            Some(dec!(500)),
            spent,
            june(3)
        )
        .is_none());
        assert!(
            ProjectionEstimator::project(PeriodKind::Monthly, 2024, Some(6), None, spent, june(3))
                .is_none()
        );
        assert!(ProjectionEstimator::project(
            PeriodKind::Monthly,
            2024,
            Some(6),
            Some(Decimal::ZERO),
            spent,
            june(3)
        )
        .is_none());
    }
}
