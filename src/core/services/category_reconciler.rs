use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::{money::checked_difference, CategoryBudgetStat, CategoryLimit, SpendBreakdown};
use crate::errors::Result;

/// Matches per-category spend against declared category limits.
pub struct CategoryReconciler;

impl CategoryReconciler {
    /// Emits one stat per limited category, then one per unbudgeted category with spend.
    ///
    /// Unbudgeted categories report `remaining = -spent` and are never overspent. The
    /// result is ordered by `spent` descending; equal spends keep emission order.
    pub fn reconcile(
        spend: &SpendBreakdown,
        limits: &[CategoryLimit],
    ) -> Result<Vec<CategoryBudgetStat>> {
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut stats = Vec::with_capacity(limits.len() + spend.len());

        for limit in limits {
            if !emitted.insert(limit.category.as_str()) {
                continue;
            }
            let spent = spend.get(&limit.category).unwrap_or_default();
            stats.push(CategoryBudgetStat {
                category: limit.category.clone(),
                budget_amount: Some(limit.amount),
                spent,
                remaining: checked_difference(limit.amount, spent, "reconciling a category")?,
                overspent: spent > limit.amount,
            });
        }

        for (category, spent) in spend.iter() {
            if emitted.contains(category) {
                continue;
            }
            stats.push(CategoryBudgetStat {
                category: category.to_string(),
                budget_amount: None,
                spent,
                remaining: checked_difference(Decimal::ZERO, spent, "reconciling a category")?,
                overspent: false,
            });
        }

        stats.sort_by(|a, b| b.spent.cmp(&a.spent));
        Ok(stats)
    }
}
