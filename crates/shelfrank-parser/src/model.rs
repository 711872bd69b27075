use polars::prelude::DataFrame;

/// Canonical column names of the raw sales table. Every format parser maps
/// its source headers onto these; downstream code never sees source headers.
pub const COL_PRODUCT_LEVEL: &str = "product_level";
pub const COL_SUBCATEGORY: &str = "subcategory";
pub const COL_BRAND: &str = "brand";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_DISTRIBUTION_PCT: &str = "distribution_pct";
pub const COL_VELOCITY: &str = "velocity";

pub const RAW_COLUMNS: [&str; 6] = [
    COL_PRODUCT_LEVEL,
    COL_SUBCATEGORY,
    COL_BRAND,
    COL_DESCRIPTION,
    COL_DISTRIBUTION_PCT,
    COL_VELOCITY,
];

/// One decoded sales export. All six canonical columns are nullable strings;
/// numeric coercion happens in the cleaning pipeline, so a malformed cell is
/// carried through as data, not raised here as an error.
#[derive(Debug, Clone)]
pub struct RawSalesTable {
    pub df: DataFrame,
    /// The header row of the source file, as found.
    pub source_headers: Vec<String>,
}

impl RawSalesTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }
}
