use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::{
    RawSalesTable, COL_BRAND, COL_DESCRIPTION, COL_DISTRIBUTION_PCT, COL_PRODUCT_LEVEL,
    COL_SUBCATEGORY, COL_VELOCITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    ProductLevel,
    Subcategory,
    Brand,
    Description,
    Distribution,
    Velocity,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 6] = [
        ColumnRole::ProductLevel,
        ColumnRole::Subcategory,
        ColumnRole::Brand,
        ColumnRole::Description,
        ColumnRole::Distribution,
        ColumnRole::Velocity,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            ColumnRole::ProductLevel => COL_PRODUCT_LEVEL,
            ColumnRole::Subcategory => COL_SUBCATEGORY,
            ColumnRole::Brand => COL_BRAND,
            ColumnRole::Description => COL_DESCRIPTION,
            ColumnRole::Distribution => COL_DISTRIBUTION_PCT,
            ColumnRole::Velocity => COL_VELOCITY,
        }
    }
}

/// Maps a source header cell to a canonical column role. Matching is
/// case-insensitive against the workbook's verbose headers plus the short
/// aliases seen in hand-trimmed exports. Unrecognized headers return `None`
/// and the column is ignored.
pub(crate) fn classify_header(cell: &str) -> Option<ColumnRole> {
    let normalized = cell.trim().to_ascii_lowercase().replace(['_', '-'], " ");
    match normalized.as_str() {
        "product level" | "level" => Some(ColumnRole::ProductLevel),
        "subcategory" | "sub category" => Some(ColumnRole::Subcategory),
        "brand" => Some(ColumnRole::Brand),
        "description" | "product description" | "item description" => {
            Some(ColumnRole::Description)
        }
        "% of stores selling" | "pct of stores selling" | "distribution pct" | "distribution %"
        | "distribution" => Some(ColumnRole::Distribution),
        "average weekly units per store selling per item"
        | "avg weekly units per store selling"
        | "velocity" => Some(ColumnRole::Velocity),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub(crate) struct RawColumns {
    pub product_level: Vec<Option<String>>,
    pub subcategory: Vec<Option<String>>,
    pub brand: Vec<Option<String>>,
    pub description: Vec<Option<String>>,
    pub distribution_pct: Vec<Option<String>>,
    pub velocity: Vec<Option<String>>,
}

impl RawColumns {
    fn push(&mut self, role: ColumnRole, value: Option<String>) {
        match role {
            ColumnRole::ProductLevel => self.product_level.push(value),
            ColumnRole::Subcategory => self.subcategory.push(value),
            ColumnRole::Brand => self.brand.push(value),
            ColumnRole::Description => self.description.push(value),
            ColumnRole::Distribution => self.distribution_pct.push(value),
            ColumnRole::Velocity => self.velocity.push(value),
        }
    }
}

fn clean_cell(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn string_series(name: &'static str, values: &[Option<String>]) -> Series {
    let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
    Series::new(name.into(), utf8)
}

fn build_raw_dataframe(
    parser: &'static str,
    columns: RawColumns,
) -> Result<DataFrame, ParserError> {
    DataFrame::new(vec![
        string_series(COL_PRODUCT_LEVEL, &columns.product_level).into(),
        string_series(COL_SUBCATEGORY, &columns.subcategory).into(),
        string_series(COL_BRAND, &columns.brand).into(),
        string_series(COL_DESCRIPTION, &columns.description).into(),
        string_series(COL_DISTRIBUTION_PCT, &columns.distribution_pct).into(),
        string_series(COL_VELOCITY, &columns.velocity).into(),
    ])
    .map_err(|err| ParserError::Validation {
        parser,
        message: format!("failed to build raw sales dataframe: {err}"),
    })
}

/// Shared decode routine for the delimited export formats. The header row is
/// classified into column roles; every required role must appear exactly
/// once. Data cells are trimmed, empty cells become null, and short rows are
/// padded with nulls. No numeric parsing happens here.
pub(crate) fn parse_delimited(
    parser: &'static str,
    content: &str,
    delimiter: u8,
) -> Result<RawSalesTable, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(ParserError::FormatMismatch {
            parser,
            reason: "file is empty".to_string(),
        })?
        .map_err(|err| ParserError::Csv {
            parser,
            source: err,
        })?;

    if header.len() < 2 {
        return Err(ParserError::FormatMismatch {
            parser,
            reason: "header row did not split into multiple columns".to_string(),
        });
    }

    let roles: Vec<Option<ColumnRole>> = header.iter().map(classify_header).collect();

    for role in ColumnRole::ALL {
        let count = roles.iter().filter(|r| **r == Some(role)).count();
        if count == 0 {
            return Err(ParserError::FormatMismatch {
                parser,
                reason: format!("missing required column '{}'", role.canonical_name()),
            });
        }
        if count > 1 {
            return Err(ParserError::Validation {
                parser,
                message: format!(
                    "column '{}' matched {count} header cells",
                    role.canonical_name()
                ),
            });
        }
    }

    let mut columns = RawColumns::default();
    let mut row_count = 0usize;

    for record in records {
        let record = record.map_err(|err| ParserError::Csv {
            parser,
            source: err,
        })?;

        for (idx, role) in roles.iter().enumerate() {
            if let Some(role) = role {
                columns.push(*role, clean_cell(record.get(idx)));
            }
        }
        row_count += 1;
    }

    if row_count == 0 {
        return Err(ParserError::EmptyData { parser });
    }

    let df = build_raw_dataframe(parser, columns)?;
    let source_headers = header.iter().map(|cell| cell.trim().to_string()).collect();

    Ok(RawSalesTable { df, source_headers })
}
