use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::PeriodKey;

/// A spending limit for one named category within a budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryLimit {
    pub category: String,
    pub amount: Decimal,
}

impl CategoryLimit {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// A user's declared spending limit for one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub period: PeriodKey,
    pub total_amount: Decimal,
    #[serde(default)]
    pub category_limits: Vec<CategoryLimit>,
}

impl Budget {
    pub fn new(
        user_id: Uuid,
        period: PeriodKey,
        total_amount: Decimal,
        category_limits: Vec<CategoryLimit>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            period,
            total_amount,
            category_limits,
        }
    }
}
