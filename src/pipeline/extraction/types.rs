use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Text of one document page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

/// PDF text extraction abstraction
pub trait PdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;
}

/// Full document text: pages in order, separated by a single newline.
pub fn join_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pick one page by its 1-based number.
pub fn select_page(pages: &[PageText], page_number: usize) -> Result<&PageText, ExtractionError> {
    if page_number == 0 {
        return Err(ExtractionError::InvalidPage(page_number));
    }
    pages
        .get(page_number - 1)
        .ok_or(ExtractionError::PageOutOfRange {
            requested: page_number,
            total: pages.len(),
        })
}
