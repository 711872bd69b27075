use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use shelfrank_parser::{parse_sales_export, RawSalesTable};
use tracing::debug;

use crate::cleaning::clean_sales_data;
use crate::error::Result;
use crate::strength::apply_sales_strength;
use crate::types::CleanConfig;

/// Reads and decodes a sales export from disk. A missing or unreadable file,
/// or one no format parser recognizes, is the session's one fatal failure
/// mode; everything downstream degrades to nulls instead of erroring.
pub fn load_raw_table(path: &Path) -> Result<RawSalesTable> {
    let content = fs::read_to_string(path)?;
    let raw = parse_sales_export(&content)?;
    Ok(raw)
}

/// Builds the session working set: clean the raw table, then derive the
/// sales-strength column. Run once per session; the result is read-only
/// afterwards.
pub fn build_working_set(raw: &RawSalesTable, config: &CleanConfig) -> Result<DataFrame> {
    let cleaned = clean_sales_data(&raw.df, config)?;
    let working_set = apply_sales_strength(&cleaned)?;

    debug!(
        raw_rows = raw.height(),
        kept_rows = working_set.height(),
        "built working set"
    );

    Ok(working_set)
}
