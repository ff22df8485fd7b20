use serde::Serialize;

use super::pattern::{Matcher, CHAPTER_GROUP};
use super::PatternError;

/// One chapter's slice of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSegment {
    /// Trimmed `chapter` capture of the heading match.
    pub name: String,
    /// Byte offset of the heading match in the document.
    pub start: usize,
    /// Start of the next heading, or the document length.
    pub end: usize,
    pub text: String,
}

/// Split `document_text` at every chapter heading.
///
/// Segment *i* runs from heading *i* to heading *i+1* (the last one to
/// end of document). Text before the first heading belongs to no
/// segment. No headings means no segments.
pub fn segment(
    document_text: &str,
    chapter_matcher: &Matcher,
) -> Result<Vec<ChapterSegment>, PatternError> {
    let headings: Vec<(usize, String)> = chapter_matcher
        .captures_all(document_text)?
        .iter()
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps
                .name(CHAPTER_GROUP)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            Some((whole.start(), name))
        })
        .collect();

    let mut segments = Vec::with_capacity(headings.len());
    for (i, (start, name)) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(document_text.len());
        segments.push(ChapterSegment {
            name: name.clone(),
            start: *start,
            end,
            text: document_text[*start..end].to_string(),
        });
    }

    tracing::debug!(chapters = segments.len(), "Segmented document");
    Ok(segments)
}
