//! Overflow-checked arithmetic on money amounts.

use rust_decimal::Decimal;

use crate::errors::{BudgetError, Result};

/// Sums amounts, failing with [`BudgetError::AmountOverflow`] instead of panicking.
pub fn checked_sum<I>(amounts: I, context: &str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .ok_or_else(|| BudgetError::overflow(context))
    })
}

pub fn checked_difference(lhs: Decimal, rhs: Decimal, context: &str) -> Result<Decimal> {
    lhs.checked_sub(rhs)
        .ok_or_else(|| BudgetError::overflow(context))
}
