//! Assembles a [`BudgetOverview`] from store data and owns the budget write path.

use std::{str::FromStr, sync::Arc};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::core::time::{Clock, SystemClock};
use crate::domain::{
    money::checked_difference, Budget, BudgetOverview, BudgetSuggestion, CategoryLimit,
    PeriodKey, PeriodKind,
};
use crate::errors::{BudgetError, Result};
use crate::storage::BudgetStore;

use super::{
    category_reconciler::CategoryReconciler, period_resolver::PeriodResolver,
    projection::ProjectionEstimator, rollover::RolloverCalculator,
    spend_aggregator::SpendAggregator, suggestion::HistoricalSuggestionEngine,
};

/// Raw category limit as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryLimitInput {
    pub category: String,
    pub amount: String,
}

impl CategoryLimitInput {
    pub fn new(category: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
        }
    }
}

/// Request to create or replace the budget of one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveBudgetRequest {
    pub kind: PeriodKind,
    pub amount: String,
    #[serde(default)]
    pub category_limits: Vec<CategoryLimitInput>,
    /// Target period; the current period of `kind` when absent.
    #[serde(default)]
    pub period: Option<PeriodKey>,
}

impl SaveBudgetRequest {
    pub fn new(kind: PeriodKind, amount: impl Into<String>) -> Self {
        Self {
            kind,
            amount: amount.into(),
            category_limits: Vec::new(),
            period: None,
        }
    }

    pub fn with_limit(mut self, category: impl Into<String>, amount: impl Into<String>) -> Self {
        self.category_limits
            .push(CategoryLimitInput::new(category, amount));
        self
    }

    pub fn for_period(mut self, period: PeriodKey) -> Self {
        self.period = Some(period);
        self
    }
}

/// Read and write entry point of the engine.
pub struct BudgetOverviewService {
    store: Arc<dyn BudgetStore>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl BudgetOverviewService {
    pub fn new(store: Arc<dyn BudgetStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            config: EngineConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Overview of the current `kind` period, as of the service clock.
    pub async fn get_overview(&self, user_id: Uuid, kind: PeriodKind) -> Result<BudgetOverview> {
        self.overview_at(user_id, kind, self.clock.now()).await
    }

    /// Overview of the `kind` period containing `now`.
    #[instrument(skip(self), fields(period = tracing::field::Empty))]
    pub async fn overview_at(
        &self,
        user_id: Uuid,
        kind: PeriodKind,
        now: DateTime<Utc>,
    ) -> Result<BudgetOverview> {
        self.ensure_user(user_id).await?;

        let today = now.date_naive();
        let current = PeriodResolver::resolve_current(kind, today);
        let bounds = PeriodResolver::bounds_for(&current)?;
        let previous = PeriodResolver::previous_of(&current);
        let previous_bounds = PeriodResolver::bounds_for(&previous)?;
        let history_start =
            PeriodResolver::months_before(bounds.start, self.config.historical_window_months)?;
        tracing::Span::current().record("period", tracing::field::display(&current));

        let store = self.store.as_ref();
        let (budget, expenses, previous_budget, previous_expenses, history) = futures::try_join!(
            store.find_budget(user_id, &current),
            store.find_expenses(user_id, bounds.start, bounds.end),
            store.find_budget(user_id, &previous),
            store.find_expenses(user_id, previous_bounds.start, previous_bounds.end),
            store.find_expenses(user_id, history_start, bounds.end),
        )?;

        let spent = SpendAggregator::total_spend(&expenses)?;
        let budget_amount = budget.as_ref().map(|b| b.total_amount);
        let (remaining, overspent) = match budget_amount {
            Some(total) => (
                checked_difference(total, spent, "computing remaining budget")?,
                spent > total,
            ),
            None => (Decimal::ZERO, false),
        };

        let limits = budget
            .as_ref()
            .map(|b| b.category_limits.as_slice())
            .unwrap_or_default();
        let categories =
            CategoryReconciler::reconcile(&SpendAggregator::by_category(&expenses)?, limits)?;

        let previous_spent = SpendAggregator::total_spend(&previous_expenses)?;
        let rollover_leftover =
            RolloverCalculator::rollover(previous_budget.as_ref(), previous_spent)?;

        let suggestion = BudgetSuggestion::from_categories(
            HistoricalSuggestionEngine::from_config(&self.config).suggest(&history)?,
        )?;

        let projection = ProjectionEstimator::project(
            current.kind,
            current.year,
            current.month,
            budget_amount,
            spent,
            today,
        );

        debug!(
            %spent,
            budget = ?budget_amount,
            previous_spent = %previous_spent,
            history_records = history.len(),
            "overview computed"
        );

        let (auto_suggested_total, auto_suggested_categories) = match suggestion {
            Some(suggestion) => (Some(suggestion.total), Some(suggestion.categories)),
            None => (None, None),
        };

        Ok(BudgetOverview {
            period: current.kind,
            year: current.year,
            month: current.month,
            week: current.week,
            period_start: bounds.start,
            period_end: bounds.end,
            budget_amount,
            spent,
            remaining,
            overspent,
            categories,
            rollover_leftover,
            auto_suggested_total,
            auto_suggested_categories,
            projected_spend: projection.map(|p| p.projected_spend),
            projected_over_by: projection.and_then(|p| p.projected_over_by),
        })
    }

    /// Creates or fully replaces the budget of the requested period.
    ///
    /// The total must be a positive amount. Category entries with a blank name or a
    /// non-positive amount are dropped; the rest replace the stored limits.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn save_budget(&self, user_id: Uuid, request: SaveBudgetRequest) -> Result<Budget> {
        let total = parse_positive_amount("amount", &request.amount)?;
        let limits = sanitize_limits(&request.category_limits);
        let period = match request.period {
            Some(period) => {
                period.validate()?;
                if period.kind != request.kind {
                    return Err(BudgetError::InvalidPeriod(format!(
                        "{} period supplied for a {} budget",
                        period.kind, request.kind
                    )));
                }
                period
            }
            None => PeriodResolver::resolve_current(request.kind, self.clock.today()),
        };

        self.ensure_user(user_id).await?;
        let budget = self
            .store
            .replace_budget(user_id, &period, total, limits)
            .await?;
        info!(
            budget_id = %budget.id,
            %period,
            total = %budget.total_amount,
            categories = budget.category_limits.len(),
            "budget saved"
        );
        Ok(budget)
    }

    async fn ensure_user(&self, user_id: Uuid) -> Result<()> {
        if self.store.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(BudgetError::UserNotFound(user_id))
        }
    }
}

/// Parses a decimal or scientific-notation amount that must be strictly positive.
///
/// Digit separators (`1_000`) are rejected.
pub fn parse_positive_amount(field: &str, raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.contains('_') {
        return Err(BudgetError::invalid_amount(field, raw));
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| BudgetError::invalid_amount(field, raw))?;
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(BudgetError::invalid_amount(field, raw))
    }
}

/// Keeps valid entries; a repeated name takes the later amount at the earlier position.
fn sanitize_limits(inputs: &[CategoryLimitInput]) -> Vec<CategoryLimit> {
    let mut limits: Vec<CategoryLimit> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let category = input.category.trim();
        if category.is_empty() {
            warn!(amount = %input.amount, "dropping category limit without a name");
            continue;
        }
        let amount = match parse_positive_amount(category, &input.amount) {
            Ok(amount) => amount,
            Err(err) => {
                warn!(%category, error = %err, "dropping category limit");
                continue;
            }
        };
        match limits.iter_mut().find(|limit| limit.category == category) {
            Some(existing) => existing.amount = amount,
            None => limits.push(CategoryLimit::new(category, amount)),
        }
    }
    limits
}
