use rust_decimal::Decimal;

use crate::domain::{money::checked_difference, Budget};
use crate::errors::Result;

pub struct RolloverCalculator;

impl RolloverCalculator {
    /// Unspent amount of the previous period's budget. Only strictly positive leftovers count.
    pub fn rollover(
        previous_budget: Option<&Budget>,
        previous_spend: Decimal,
    ) -> Result<Option<Decimal>> {
        let Some(budget) = previous_budget else {
            return Ok(None);
        };
        let leftover =
            checked_difference(budget.total_amount, previous_spend, "computing rollover")?;
        Ok((leftover > Decimal::ZERO).then_some(leftover))
    }
}
