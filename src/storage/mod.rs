pub mod memory_backend;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::{Budget, CategoryLimit, ExpenseRecord, PeriodKey},
    errors::Result,
};

/// Query primitives the engine needs from whatever store holds budgets and transactions.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool>;

    async fn find_budget(&self, user_id: Uuid, period: &PeriodKey) -> Result<Option<Budget>>;

    /// Expense records dated within `start..=end`. Income is never returned.
    async fn find_expenses(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExpenseRecord>>;

    /// Creates the budget for `(user_id, period)` or replaces its total and limits.
    ///
    /// Must be atomic: readers never observe the new total with stale or missing limits.
    async fn replace_budget(
        &self,
        user_id: Uuid,
        period: &PeriodKey,
        total_amount: Decimal,
        category_limits: Vec<CategoryLimit>,
    ) -> Result<Budget>;
}

pub use memory_backend::MemoryStore;
