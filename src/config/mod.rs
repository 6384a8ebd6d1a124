use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};
use crate::utils::persistence::{load_json, save_json_atomic};

pub const DEFAULT_HISTORICAL_WINDOW_MONTHS: u32 = 3;
pub const DEFAULT_SUGGESTION_CATEGORY_LIMIT: usize = 8;

/// Tunables for the overview engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Calendar months of history averaged into a suggested budget.
    pub historical_window_months: u32,
    /// Maximum number of categories in a suggested budget.
    pub suggestion_category_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            historical_window_months: DEFAULT_HISTORICAL_WINDOW_MONTHS,
            suggestion_category_limit: DEFAULT_SUGGESTION_CATEGORY_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            load_json::<Self>(path)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        save_json_atomic(self, path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.historical_window_months == 0 {
            return Err(BudgetError::ConfigError(
                "historical_window_months must be at least 1".into(),
            ));
        }
        if self.suggestion_category_limit == 0 {
            return Err(BudgetError::ConfigError(
                "suggestion_category_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
