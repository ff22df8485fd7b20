pub mod types;
pub mod pdf;

pub use types::*;
pub use pdf::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Page numbers start at 1, got {0}")]
    InvalidPage(usize),

    #[error("Page {requested} is out of range, document has only {total} page(s)")]
    PageOutOfRange { requested: usize, total: usize },
}
