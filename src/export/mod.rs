pub mod csv;
pub mod pdf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV rendering error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Export rendering error: {0}")]
    Render(String),

    #[error("PDF rendering error: {0}")]
    Pdf(String),
}

pub use self::csv::render_csv;
pub use self::pdf::render_receipt_pdf;
