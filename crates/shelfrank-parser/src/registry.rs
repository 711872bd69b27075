use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{CommaExportParser, TabExportParser};
use crate::model::RawSalesTable;

pub trait SalesExportParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<RawSalesTable, ParserError>;
}

pub fn parse_sales_export(content: &str) -> Result<RawSalesTable, ParserError> {
    let comma = CommaExportParser;
    let tab = TabExportParser;
    let parsers: [&dyn SalesExportParser; 2] = [&comma, &tab];
    parse_with_parsers(content, &parsers)
}

pub fn parse_with_parsers(
    content: &str,
    parsers: &[&dyn SalesExportParser],
) -> Result<RawSalesTable, ParserError> {
    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(content) {
            Ok(parsed) => return Ok(parsed),
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
