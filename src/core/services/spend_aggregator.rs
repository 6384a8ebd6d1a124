use rust_decimal::Decimal;

use crate::domain::{money::checked_sum, ExpenseRecord, SpendBreakdown};
use crate::errors::Result;

/// Reduces expense records into totals. Callers pass records already limited to a date range.
pub struct SpendAggregator;

impl SpendAggregator {
    pub fn total_spend(records: &[ExpenseRecord]) -> Result<Decimal> {
        checked_sum(records.iter().map(|record| record.amount), "summing spend")
    }

    pub fn by_category(records: &[ExpenseRecord]) -> Result<SpendBreakdown> {
        let mut breakdown = SpendBreakdown::new();
        for record in records {
            breakdown.add(record.category_key(), record.amount)?;
        }
        Ok(breakdown)
    }
}
