use polars::prelude::*;

use crate::types::{COL_DISTRIBUTION_PCT, COL_SALES_STRENGTH, COL_VELOCITY};

/// Appends the derived `sales_strength` column:
/// `velocity * (distribution_pct / 100)`, null when either operand is null.
/// Always recomputed from the two inputs; a pre-existing source value is
/// never trusted.
pub fn apply_sales_strength(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let velocity = df.column(COL_VELOCITY)?.f64()?;
    let distribution = df.column(COL_DISTRIBUTION_PCT)?.f64()?;

    let mut strength: Vec<Option<f64>> = Vec::with_capacity(len);
    for idx in 0..len {
        strength.push(compute_row(velocity.get(idx), distribution.get(idx)));
    }

    let mut output = df.clone();
    if output.get_column_names_str().contains(&COL_SALES_STRENGTH) {
        output = output.drop(COL_SALES_STRENGTH)?;
    }
    output.hstack_mut(&mut [Series::new(COL_SALES_STRENGTH.into(), strength).into()])?;

    Ok(output)
}

fn compute_row(velocity: Option<f64>, distribution_pct: Option<f64>) -> Option<f64> {
    match (velocity, distribution_pct) {
        (Some(velocity), Some(distribution_pct)) => Some(velocity * (distribution_pct / 100.0)),
        _ => None,
    }
}
