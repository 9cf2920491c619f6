//! FILENAME: core/engine/src/config.rs
//! PURPOSE: Spreadsheet configuration (grid dimensions, calculation mode).
//! CONTEXT: Loaded from JSON by the host or built in code. Every field has a
//! default, so a partial document such as `{"rows": 5}` is valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted column or row count.
pub const MAX_DIMENSION: u32 = 1000;

pub const DEFAULT_COLUMNS: u32 = 10;
pub const DEFAULT_ROWS: u32 = 20;

/// When dependants of an edited cell are recalculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Every edit propagates to its dependants.
    #[default]
    Automatic,
    /// Edits only evaluate the edited cell until `calculate_now`.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpreadsheetConfig {
    pub columns: u32,
    pub rows: u32,
    pub calculation_mode: CalculationMode,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        SpreadsheetConfig {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            calculation_mode: CalculationMode::Automatic,
        }
    }
}

impl SpreadsheetConfig {
    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        SpreadsheetConfig {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Parses a JSON document and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SpreadsheetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.columns, self.rows)
    }
}

/// Both dimensions must lie in `1..=MAX_DIMENSION`.
pub fn validate_dimensions(columns: u32, rows: u32) -> Result<(), ConfigError> {
    let range = 1..=MAX_DIMENSION;
    if range.contains(&columns) && range.contains(&rows) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimensions {
            columns,
            rows,
            max: MAX_DIMENSION,
        })
    }
}
