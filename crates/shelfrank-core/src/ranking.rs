use std::cmp::Ordering;
use std::collections::BTreeSet;

use polars::prelude::*;

use crate::types::{
    RankMetric, RankedProduct, COL_BRAND, COL_DESCRIPTION, COL_DISTRIBUTION_PCT, COL_SUBCATEGORY,
};

/// Top `n` working-set rows for an exact-match subcategory, descending by the
/// chosen metric. The sort is stable, so metric ties keep the working set's
/// row order; null metrics sort after every non-null value. An unknown
/// subcategory yields an empty table, not an error.
pub fn top_n(
    df: &DataFrame,
    subcategory: &str,
    metric: RankMetric,
    n: usize,
) -> Result<DataFrame, PolarsError> {
    let subcategory_col = df.column(COL_SUBCATEGORY)?.str()?;
    let metric_col = df.column(metric.column_name())?.f64()?;

    let mut matches: Vec<usize> = Vec::new();
    for idx in 0..df.height() {
        if subcategory_col.get(idx) == Some(subcategory) {
            matches.push(idx);
        }
    }

    matches.sort_by(|&a, &b| compare_desc_nulls_last(metric_col.get(a), metric_col.get(b)));
    matches.truncate(n);

    let indices = IdxCa::from_vec(
        "top_n".into(),
        matches.iter().map(|&idx| idx as IdxSize).collect(),
    );
    df.take(&indices)
}

fn compare_desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        // total_cmp keeps the ordering total if a NaN ever survives coercion.
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Distinct non-null subcategories of the working set, sorted ascending for
/// display in selection widgets.
pub fn subcategories(df: &DataFrame) -> Result<Vec<String>, PolarsError> {
    let column = df.column(COL_SUBCATEGORY)?.str()?;

    let mut distinct = BTreeSet::new();
    for idx in 0..df.height() {
        if let Some(value) = column.get(idx) {
            distinct.insert(value.to_string());
        }
    }

    Ok(distinct.into_iter().collect())
}

/// Materializes ranked rows into presentation-ready views, in table order.
/// The first element, when present, is the "best performer".
pub fn ranked_products(
    df: &DataFrame,
    metric: RankMetric,
) -> Result<Vec<RankedProduct>, PolarsError> {
    let brand = df.column(COL_BRAND)?.str()?;
    let description = df.column(COL_DESCRIPTION)?.str()?;
    let metric_col = df.column(metric.column_name())?.f64()?;
    let distribution = df.column(COL_DISTRIBUTION_PCT)?.f64()?;

    let mut products = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        products.push(RankedProduct {
            brand: brand.get(idx).map(str::to_string),
            description: description.get(idx).map(str::to_string),
            metric_value: metric_col.get(idx),
            distribution_pct: distribution.get(idx),
        });
    }

    Ok(products)
}
