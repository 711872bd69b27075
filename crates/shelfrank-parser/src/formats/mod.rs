mod comma_export;
mod common;
mod tab_export;

pub use comma_export::CommaExportParser;
pub use tab_export::TabExportParser;

pub(crate) use common::{classify_header, parse_delimited, ColumnRole};
