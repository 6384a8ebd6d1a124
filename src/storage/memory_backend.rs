use std::{collections::BTreeSet, path::Path};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{Budget, CategoryLimit, EntryKind, ExpenseRecord, LedgerEntry, PeriodKey},
    errors::{BudgetError, Result},
    utils::persistence::{load_json, save_json_atomic},
};

use super::BudgetStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    users: BTreeSet<Uuid>,
    budgets: Vec<Budget>,
    entries: Vec<LedgerEntry>,
}

/// In-process store guarded by a single lock; budget replacement happens under one write guard.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user_id: Uuid) {
        self.state.write().await.users.insert(user_id);
    }

    pub async fn record_entry(&self, entry: LedgerEntry) -> Result<Uuid> {
        let mut state = self.state.write().await;
        if !state.users.contains(&entry.user_id) {
            return Err(BudgetError::UserNotFound(entry.user_id));
        }
        let id = entry.id;
        state.entries.push(entry);
        Ok(id)
    }

    pub async fn record_expense(
        &self,
        user_id: Uuid,
        category: Option<&str>,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Result<Uuid> {
        self.record_entry(LedgerEntry::new(
            user_id,
            EntryKind::Expense,
            category,
            amount,
            date,
        ))
        .await
    }

    pub async fn record_income(
        &self,
        user_id: Uuid,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Result<Uuid> {
        self.record_entry(LedgerEntry::new(
            user_id,
            EntryKind::Income,
            None,
            amount,
            date,
        ))
        .await
    }

    pub async fn budgets_for(&self, user_id: Uuid) -> Vec<Budget> {
        self.state
            .read()
            .await
            .budgets
            .iter()
            .filter(|budget| budget.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Writes a JSON snapshot of the whole store.
    pub async fn save_to_path(&self, path: &Path) -> Result<()> {
        let snapshot = self.state.read().await.clone();
        save_json_atomic(&snapshot, path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let state: StoreState = load_json(path)?;
        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.state.read().await.users.contains(&user_id))
    }

    async fn find_budget(&self, user_id: Uuid, period: &PeriodKey) -> Result<Option<Budget>> {
        Ok(self
            .state
            .read()
            .await
            .budgets
            .iter()
            .find(|budget| budget.user_id == user_id && budget.period == *period)
            .cloned())
    }

    async fn find_expenses(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .state
            .read()
            .await
            .entries
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.date >= start && entry.date <= end)
            .filter_map(LedgerEntry::as_expense)
            .collect())
    }

    async fn replace_budget(
        &self,
        user_id: Uuid,
        period: &PeriodKey,
        total_amount: Decimal,
        category_limits: Vec<CategoryLimit>,
    ) -> Result<Budget> {
        let mut state = self.state.write().await;
        if !state.users.contains(&user_id) {
            return Err(BudgetError::UserNotFound(user_id));
        }
        if let Some(existing) = state
            .budgets
            .iter_mut()
            .find(|budget| budget.user_id == user_id && budget.period == *period)
        {
            existing.category_limits = category_limits;
            existing.total_amount = total_amount;
            return Ok(existing.clone());
        }
        let budget = Budget::new(user_id, *period, total_amount, category_limits);
        state.budgets.push(budget.clone());
        Ok(budget)
    }
}
