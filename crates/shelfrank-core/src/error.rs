// crates/shelfrank-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Source parsing failed: {0}")]
    Parser(#[from] shelfrank_parser::ParserError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
