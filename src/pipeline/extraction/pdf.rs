use std::path::Path;

use super::types::{PageText, PdfExtractor};
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        let pages = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                page_number: i + 1,
                text,
            })
            .collect();

        Ok(pages)
    }
}

/// Read a PDF from disk and extract its pages.
pub fn extract_file(
    extractor: &dyn PdfExtractor,
    path: &Path,
) -> Result<Vec<PageText>, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let pages = extractor.extract_pages(&bytes)?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "Extracted PDF text");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::list_questions;
    use crate::pipeline::ingest::{ingest_document, IngestRunner, RecordDefaults, SqliteQuestionStore};
    use crate::pipeline::segmentation::PatternSet;

    /// One-page PDF with `text` drawn in Helvetica.
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extracts_text_of_digital_pdf() {
        let pdf_bytes = make_test_pdf("Chapter Acids Q What is pH? Options 1 or 7");
        let pages = PdfTextExtractor.extract_pages(&pdf_bytes).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert!(
            pages[0].text.contains("Chapter Acids"),
            "unexpected page text: {:?}",
            pages[0].text
        );
    }

    #[test]
    fn pdf_file_questions_reach_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acids.pdf");
        std::fs::write(&path, make_test_pdf("Chapter Acids Q What is pH? Options 1 or 7")).unwrap();

        let runner = IngestRunner::new(
            PatternSet::compile(
                r"Chapter (?P<chapter>\w+)",
                r"Q (?P<question>[^?]*\?)\s*(?P<options>Options[^\n]*)",
            )
            .unwrap(),
            RecordDefaults::default(),
        );
        let store = SqliteQuestionStore::in_memory().unwrap();

        let result = ingest_document(&runner, &store, &PdfTextExtractor, &path, None).unwrap();
        assert_eq!(result.persisted_count, 1);
        assert_eq!(result.failed_count, 0);

        let rows = list_questions(store.connection(), None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question_text, "What is pH?");
        assert_eq!(rows[0].answer_options.as_deref(), Some("Options 1 or 7"));
        assert_eq!(rows[0].chapter_name.as_deref(), Some("Acids"));
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let extractor = PdfTextExtractor;
        let result = extractor.extract_pages(b"not a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_file(&PdfTextExtractor, &dir.path().join("absent.pdf"));
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }
}
