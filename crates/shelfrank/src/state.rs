use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use shelfrank_core::types::{CleanConfig, PRESET_SUBCATEGORIES};
use shelfrank_core::{pipeline, ranking};
use shelfrank_parser::RawSalesTable;

/// Session-wide dashboard state: the cleaned working set, computed once from
/// the source export and read-only afterwards. Selection changes re-run only
/// filter/sort/top-N over this table, never the load.
pub struct DashboardState {
    pub working_set: DataFrame,
    pub subcategories: Vec<String>,
}

impl DashboardState {
    pub fn load(source: &Path, config: CleanConfig) -> Result<Self> {
        let raw = pipeline::load_raw_table(source)
            .with_context(|| format!("failed to load sales export {}", source.display()))?;
        Self::from_raw(&raw, config)
    }

    pub fn from_raw(raw: &RawSalesTable, config: CleanConfig) -> Result<Self> {
        let working_set = pipeline::build_working_set(raw, &config)?;
        let subcategories = ranking::subcategories(&working_set)?;
        Ok(Self {
            working_set,
            subcategories,
        })
    }

    /// Quick-select presets that actually occur in this session's data.
    pub fn present_presets(&self) -> Vec<String> {
        PRESET_SUBCATEGORIES
            .iter()
            .filter(|preset| self.subcategories.iter().any(|s| s == *preset))
            .map(|preset| preset.to_string())
            .collect()
    }
}
