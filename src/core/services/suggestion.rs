//! Proposes a budget from the monthly average of recent category spend.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::domain::{ExpenseRecord, SuggestedCategory};
use crate::errors::{BudgetError, Result};

use super::spend_aggregator::SpendAggregator;

#[derive(Debug, Clone, Copy)]
pub struct HistoricalSuggestionEngine {
    window_months: u32,
    category_limit: usize,
}

impl Default for HistoricalSuggestionEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl HistoricalSuggestionEngine {
    pub fn new(window_months: u32, category_limit: usize) -> Self {
        Self {
            window_months: window_months.max(1),
            category_limit,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.historical_window_months,
            config.suggestion_category_limit,
        )
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    /// Averages each category's total over the window and keeps the largest few.
    ///
    /// Partial months and months without data still count toward the divisor.
    pub fn suggest(&self, history: &[ExpenseRecord]) -> Result<Vec<SuggestedCategory>> {
        let divisor = Decimal::from(self.window_months);
        let mut suggestions = SpendAggregator::by_category(history)?
            .iter()
            .map(|(category, total)| {
                let amount = total
                    .checked_div(divisor)
                    .ok_or_else(|| BudgetError::overflow("averaging category history"))?;
                Ok(SuggestedCategory {
                    category: category.to_string(),
                    amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        suggestions.sort_by(|a, b| b.amount.cmp(&a.amount));
        suggestions.truncate(self.category_limit);
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BudgetSuggestion;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn history(entries: &[(&str, Decimal)]) -> Vec<ExpenseRecord> {
        let user = Uuid::new_v4();
        let date = Utc.with_ymd_and_hms(2024, 4, 10, 0, 0, 0).unwrap();
        entries
            .iter()
            .map(|(category, amount)| ExpenseRecord::new(user, Some(*category), *amount, date))
            .collect()
    }

    #[test]
    fn averages_over_window() {
        let engine = HistoricalSuggestionEngine::default();
        let suggestions = engine
            .suggest(&history(&[
                ("Food", dec!(600)),
                ("Rent", dec!(3000)),
                ("Food", dec!(300)),
            ]))
            .unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category, "Rent");
        assert_eq!(suggestions[0].amount, dec!(1000));
        assert_eq!(suggestions[1].amount, dec!(300));
    }

    #[test]
    fn truncates_before_totalling() {
        let entries: Vec<(String, Decimal)> = (1..=10)
            .map(|idx| (format!("Cat{idx}"), Decimal::from(idx * 30)))
            .collect();
        let borrowed: Vec<(&str, Decimal)> = entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        let engine = HistoricalSuggestionEngine::default();
        let suggestions = engine.suggest(&history(&borrowed)).unwrap();

        assert_eq!(suggestions.len(), 8);
        assert_eq!(suggestions[0].category, "Cat10");
        assert_eq!(suggestions[7].category, "Cat3");
        let suggestion = BudgetSuggestion::from_categories(suggestions)
            .unwrap()
            .expect("non-empty suggestion");
        // (300 + 270 + ... + 90) / 3 with the two smallest categories excluded.
        assert_eq!(suggestion.total, dec!(520));
        assert_eq!(
            suggestion.total,
            suggestion.categories.iter().map(|c| c.amount).sum::<Decimal>()
        );
    }

    #[test]
    fn window_is_at_least_one_month() {
        assert_eq!(HistoricalSuggestionEngine::new(0, 8).window_months(), 1);
        let config = EngineConfig {
            historical_window_months: 6,
            ..EngineConfig::default()
        };
        assert_eq!(HistoricalSuggestionEngine::from_config(&config).window_months(), 6);
    }

    #[test]
    fn empty_history_suggests_nothing() {
        assert!(HistoricalSuggestionEngine::default()
            .suggest(&[])
            .unwrap()
            .is_empty());
    }
}
