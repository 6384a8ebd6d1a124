//! Budget, period, expense, and overview types shared by services and storage.

pub mod budget;
pub mod expense;
pub mod money;
pub mod overview;
pub mod period;

pub use budget::{Budget, CategoryLimit};
pub use expense::{EntryKind, ExpenseRecord, LedgerEntry, SpendBreakdown, UNCATEGORIZED};
pub use overview::{
    BudgetOverview, BudgetSuggestion, CategoryBudgetStat, Projection, SuggestedCategory,
};
pub use period::{PeriodBounds, PeriodKey, PeriodKind, MAX_WEEK};
