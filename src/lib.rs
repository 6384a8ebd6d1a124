#![doc(test(attr(deny(warnings))))]

//! Budget Engine aggregates a user's expenses against a declared period budget,
//! reconciles per-category limits, and derives rollover, suggestions, and a
//! month-end spend projection.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{BudgetOverviewService, SaveBudgetRequest};
pub use config::EngineConfig;
pub use errors::{BudgetError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Engine tracing initialized.");
    });
}
