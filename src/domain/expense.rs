use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::checked_sum;
use crate::errors::{BudgetError, Result};

/// Bucket used for expenses recorded without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// One recorded expense, as handed over by the transaction subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub user_id: Uuid,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn new(
        user_id: Uuid,
        category: Option<&str>,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            category: category.map(str::to_string),
            amount,
            date,
        }
    }

    /// Category this record is attributed to, falling back to [`UNCATEGORIZED`].
    pub fn category_key(&self) -> &str {
        match self.category.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNCATEGORIZED,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Income,
    Expense,
}

/// Income or expense event as kept by a store; only expenses feed the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: EntryKind,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        user_id: Uuid,
        kind: EntryKind,
        category: Option<&str>,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            category: category.map(str::to_string),
            amount,
            date,
        }
    }

    pub fn as_expense(&self) -> Option<ExpenseRecord> {
        match self.kind {
            EntryKind::Expense => Some(ExpenseRecord {
                user_id: self.user_id,
                category: self.category.clone(),
                amount: self.amount,
                date: self.date,
            }),
            EntryKind::Income => None,
        }
    }
}

/// Per-category totals kept in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendBreakdown {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl SpendBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: Decimal) -> Result<()> {
        match self.index.get(category) {
            Some(&pos) => {
                let entry = &mut self.entries[pos].1;
                *entry = entry.checked_add(amount).ok_or_else(|| {
                    BudgetError::overflow(format!("summing spend for `{category}`"))
                })?;
            }
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.index.get(category).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries
            .iter()
            .map(|(category, amount)| (category.as_str(), *amount))
    }

    pub fn total(&self) -> Result<Decimal> {
        checked_sum(
            self.entries.iter().map(|(_, amount)| *amount),
            "summing category spend",
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
