pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::{ParserAttempt, ParserError};
pub use model::{
    RawSalesTable, COL_BRAND, COL_DESCRIPTION, COL_DISTRIBUTION_PCT, COL_PRODUCT_LEVEL,
    COL_SUBCATEGORY, COL_VELOCITY, RAW_COLUMNS,
};
pub use registry::{parse_sales_export, parse_with_parsers, SalesExportParser};
