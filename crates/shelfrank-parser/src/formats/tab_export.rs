use crate::errors::ParserError;
use crate::model::RawSalesTable;
use crate::registry::SalesExportParser;

use super::parse_delimited;

/// Tab-delimited export, as produced by "save as text" from the workbook.
pub struct TabExportParser;

impl TabExportParser {
    const NAME: &'static str = "RETAIL_EXPORT_TSV";
}

impl SalesExportParser for TabExportParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<RawSalesTable, ParserError> {
        parse_delimited(Self::NAME, content, b'\t')
    }
}
