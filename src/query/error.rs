use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid fiscal year: {0}")]
    InvalidFiscalYear(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(String),
}
