use crate::errors::ParserError;
use crate::model::RawSalesTable;
use crate::registry::SalesExportParser;

use super::parse_delimited;

/// Comma-delimited export of the retail sales workbook.
pub struct CommaExportParser;

impl CommaExportParser {
    const NAME: &'static str = "RETAIL_EXPORT_CSV";
}

impl SalesExportParser for CommaExportParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<RawSalesTable, ParserError> {
        parse_delimited(Self::NAME, content, b',')
    }
}
