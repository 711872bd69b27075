use polars::prelude::*;

use crate::types::{
    CleanConfig, COL_BRAND, COL_DESCRIPTION, COL_DISTRIBUTION_PCT, COL_PRODUCT_LEVEL,
    COL_SUBCATEGORY, COL_VELOCITY, UPC_PRODUCT_LEVEL, VARIETY_PACK_NEEDLE,
};

/// A numeric-ish column that is either still raw source text or already
/// coerced. Raw cells that do not parse become null; a cleaned table fed back
/// through the pipeline coerces to itself.
enum NumericColumn<'a> {
    Raw(&'a StringChunked),
    Coerced(&'a Float64Chunked),
}

impl<'a> NumericColumn<'a> {
    fn try_new(column: &'a Column) -> Result<Self, PolarsError> {
        match column.dtype() {
            DataType::Float64 => Ok(NumericColumn::Coerced(column.f64()?)),
            _ => Ok(NumericColumn::Raw(column.str()?)),
        }
    }

    fn get(&self, idx: usize) -> Option<f64> {
        match self {
            NumericColumn::Raw(values) => values.get(idx).and_then(coerce_numeric),
            NumericColumn::Coerced(values) => values.get(idx),
        }
    }
}

fn coerce_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "NaN" parses as f64 NAN; treat it as a missing value, not a number.
    trimmed.parse::<f64>().ok().filter(|parsed| !parsed.is_nan())
}

/// Produces the cleaned working set from a raw sales table:
///
/// 1. keep only `UPC`-level rows (case-sensitive);
/// 2. drop subcategories containing `VARIETY PACKS` (case-insensitive,
///    missing subcategory is kept);
/// 3. drop the excluded brand (case-insensitive exact match, missing brand
///    is kept);
/// 4. coerce distribution to a number, uncoercible becomes null;
/// 5. drop rows with null or below-threshold distribution (`>=` boundary);
/// 6. coerce velocity to a number, uncoercible becomes null.
///
/// Pure over its input; output rows keep the input order. Coercion failures
/// are data (null), never errors.
pub fn clean_sales_data(df: &DataFrame, config: &CleanConfig) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let product_level = df.column(COL_PRODUCT_LEVEL)?.str()?;
    let subcategory = df.column(COL_SUBCATEGORY)?.str()?;
    let brand = df.column(COL_BRAND)?.str()?;
    let description = df.column(COL_DESCRIPTION)?.str()?;
    let distribution = NumericColumn::try_new(df.column(COL_DISTRIBUTION_PCT)?)?;
    let velocity = NumericColumn::try_new(df.column(COL_VELOCITY)?)?;

    let excluded_brand = config.excluded_brand.to_uppercase();

    let mut kept_subcategory: Vec<Option<&str>> = Vec::new();
    let mut kept_brand: Vec<Option<&str>> = Vec::new();
    let mut kept_description: Vec<Option<&str>> = Vec::new();
    let mut kept_distribution: Vec<f64> = Vec::new();
    let mut kept_velocity: Vec<Option<f64>> = Vec::new();

    for idx in 0..len {
        if product_level.get(idx) != Some(UPC_PRODUCT_LEVEL) {
            continue;
        }

        if let Some(subcat) = subcategory.get(idx) {
            if subcat.to_uppercase().contains(VARIETY_PACK_NEEDLE) {
                continue;
            }
        }

        if let Some(brand_value) = brand.get(idx) {
            if brand_value.to_uppercase() == excluded_brand {
                continue;
            }
        }

        // Null, NaN, and below-threshold distributions all fall to the
        // second arm; exactly-threshold is kept.
        let distribution_value = match distribution.get(idx) {
            Some(value) if value >= config.min_distribution_pct => value,
            _ => continue,
        };

        kept_subcategory.push(subcategory.get(idx));
        kept_brand.push(brand.get(idx));
        kept_description.push(description.get(idx));
        kept_distribution.push(distribution_value);
        kept_velocity.push(velocity.get(idx));
    }

    let row_count = kept_distribution.len();

    DataFrame::new(vec![
        Series::new(COL_PRODUCT_LEVEL.into(), vec![UPC_PRODUCT_LEVEL; row_count]).into(),
        Series::new(COL_SUBCATEGORY.into(), kept_subcategory).into(),
        Series::new(COL_BRAND.into(), kept_brand).into(),
        Series::new(COL_DESCRIPTION.into(), kept_description).into(),
        Series::new(COL_DISTRIBUTION_PCT.into(), kept_distribution).into(),
        Series::new(COL_VELOCITY.into(), kept_velocity).into(),
    ])
}
