//! Stateless budget computations and the service that composes them.

pub mod category_reconciler;
pub mod overview_service;
pub mod period_resolver;
pub mod projection;
pub mod rollover;
pub mod spend_aggregator;
pub mod suggestion;

pub use category_reconciler::CategoryReconciler;
pub use overview_service::{
    parse_positive_amount, BudgetOverviewService, CategoryLimitInput, SaveBudgetRequest,
};
pub use period_resolver::{PeriodResolver, PREVIOUS_YEAR_LAST_WEEK};
pub use projection::ProjectionEstimator;
pub use rollover::RolloverCalculator;
pub use spend_aggregator::SpendAggregator;
pub use suggestion::HistoricalSuggestionEngine;
