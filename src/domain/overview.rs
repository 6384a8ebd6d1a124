use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::checked_sum;
use super::period::PeriodKind;
use crate::errors::Result;

/// Spend against one category, with its limit when one is configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBudgetStat {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub budget_amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    pub overspent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedCategory {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Budget proposal derived from recent history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetSuggestion {
    pub categories: Vec<SuggestedCategory>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl BudgetSuggestion {
    /// Returns `None` for an empty list so callers can omit the suggestion entirely.
    pub fn from_categories(categories: Vec<SuggestedCategory>) -> Result<Option<Self>> {
        if categories.is_empty() {
            return Ok(None);
        }
        let total = checked_sum(
            categories.iter().map(|entry| entry.amount),
            "totalling a suggestion",
        )?;
        Ok(Some(Self { categories, total }))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Projection {
    pub projected_spend: Decimal,
    pub projected_over_by: Option<Decimal>,
}

/// Everything the engine reports about the current period of one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetOverview {
    pub period: PeriodKind,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub budget_amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    pub overspent: bool,
    pub categories: Vec<CategoryBudgetStat>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rollover_leftover: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub auto_suggested_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_suggested_categories: Option<Vec<SuggestedCategory>>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub projected_spend: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub projected_over_by: Option<Decimal>,
}
