use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-exported so consumers can address working-set columns without depending
// on the parser crate directly.
pub use shelfrank_parser::{
    COL_BRAND, COL_DESCRIPTION, COL_DISTRIBUTION_PCT, COL_PRODUCT_LEVEL, COL_SUBCATEGORY,
    COL_VELOCITY,
};

/// Only rows at this product level enter the working set. Matched
/// case-sensitively against the source value.
pub const UPC_PRODUCT_LEVEL: &str = "UPC";

/// Subcategories containing this substring (case-insensitively) are bundles
/// of other products and are dropped before ranking.
pub const VARIETY_PACK_NEEDLE: &str = "VARIETY PACKS";

/// Derived ranking column added by [`crate::strength::apply_sales_strength`].
pub const COL_SALES_STRENGTH: &str = "sales_strength";

pub const DEFAULT_EXCLUDED_BRAND: &str = "FRITO LAY";
pub const DEFAULT_MIN_DISTRIBUTION_PCT: f64 = 10.0;
pub const DEFAULT_TOP_N: usize = 10;

/// Quick-select subcategories surfaced first by the dashboard.
pub const PRESET_SUBCATEGORIES: [&str; 3] = [
    "SS POTATO CHIPS",
    "SS TORTILLA & CORN CHIPS",
    "SS PUFFED SNACKS & STRAWS",
];

/// The two ranking metrics offered to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Velocity,
    SalesStrength,
}

impl RankMetric {
    /// Working-set column holding this metric's values.
    pub fn column_name(&self) -> &'static str {
        match self {
            RankMetric::Velocity => COL_VELOCITY,
            RankMetric::SalesStrength => COL_SALES_STRENGTH,
        }
    }

    /// Human-facing label, as shown in chart axes and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            RankMetric::Velocity => "Velocity",
            RankMetric::SalesStrength => "Sales Strength",
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RankMetric {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "velocity" => Ok(RankMetric::Velocity),
            "sales strength" | "strength" => Ok(RankMetric::SalesStrength),
            other => Err(format!(
                "unknown metric '{other}' (expected 'velocity' or 'sales_strength')"
            )),
        }
    }
}

/// Knobs of the cleaning pass. Defaults reproduce the production dashboard:
/// the category owner's non-product rollup rows are excluded by brand, and
/// thinly distributed items are cut at 10% of stores.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Brand excluded by case-insensitive exact match.
    pub excluded_brand: String,
    /// Rows below this distribution percentage (or with uncoercible
    /// distribution) are dropped. Compared as `coerced >= threshold`.
    pub min_distribution_pct: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            excluded_brand: DEFAULT_EXCLUDED_BRAND.to_string(),
            min_distribution_pct: DEFAULT_MIN_DISTRIBUTION_PCT,
        }
    }
}

/// Row view of a ranked product, for tables and API payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProduct {
    pub brand: Option<String>,
    pub description: Option<String>,
    pub metric_value: Option<f64>,
    pub distribution_pct: Option<f64>,
}
