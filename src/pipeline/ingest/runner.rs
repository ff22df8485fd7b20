//! IngestRunner — bulk extraction of questions from document text.
//!
//! Idle → SchemaEnsured → Segmented → (per chapter: extract → persist)* → Done.
//! A schema failure or a pattern the engine gives up on halts the run; a
//! failed insert is logged, counted and skipped.

use std::path::Path;

use super::error::IngestError;
use super::traits::QuestionGateway;
use super::types::*;
use crate::config::IngestConfig;
use crate::models::QuestionRecord;
use crate::pipeline::extraction::{extract_file, join_pages, PageText, PdfExtractor};
use crate::pipeline::segmentation::{extract, segment, PatternSet};

/// Compiled patterns plus record defaults, reusable across documents.
#[derive(Debug, Clone)]
pub struct IngestRunner {
    patterns: PatternSet,
    defaults: RecordDefaults,
}

impl IngestRunner {
    pub fn new(patterns: PatternSet, defaults: RecordDefaults) -> Self {
        Self { patterns, defaults }
    }

    /// Missing patterns are a configuration error; bad ones a pattern error.
    pub fn from_config(config: &IngestConfig) -> Result<Self, IngestError> {
        let (chapter, question) = config.require_patterns()?;
        let patterns = PatternSet::compile(chapter, question)?;
        Ok(Self::new(patterns, config.record_defaults()))
    }

    /// Run the pipeline over one document's full text.
    pub fn run(
        &self,
        gateway: &dyn QuestionGateway,
        document_text: &str,
        progress_fn: Option<&dyn Fn(IngestEvent)>,
    ) -> Result<IngestResult, IngestError> {
        let emit = |event: IngestEvent| {
            if let Some(progress) = progress_fn {
                progress(event);
            }
        };
        let mut stage = IngestStage::Idle;
        tracing::debug!(stage = stage.as_str(), "Starting ingest run");

        gateway.ensure_schema().map_err(IngestError::Schema)?;
        stage = IngestStage::SchemaEnsured;
        emit(IngestEvent::Stage { stage });

        let chapters = segment(document_text, &self.patterns.chapter)?;
        stage = IngestStage::Segmented;
        emit(IngestEvent::Stage { stage });

        if chapters.is_empty() {
            tracing::warn!("No chapter headings matched; nothing to extract");
        }

        let mut result = IngestResult::empty();
        result.chapter_count = chapters.len() as u32;

        for (index, chapter) in chapters.iter().enumerate() {
            let matches = extract(&chapter.text, &self.patterns.question)?;
            let chapter_name = self.chapter_name(&chapter.name);

            tracing::debug!(
                chapter = chapter.name.as_str(),
                questions = matches.len(),
                "Extracted chapter"
            );
            emit(IngestEvent::ChapterStarted {
                index,
                name: chapter.name.clone(),
                question_count: matches.len(),
            });

            for raw in matches {
                let record = QuestionRecord::extracted(
                    raw.question_text,
                    raw.option_text,
                    non_empty(&self.defaults.subject_name),
                    chapter_name.clone(),
                );

                match record.persist(gateway) {
                    Ok(()) => result.persisted_count += 1,
                    Err(e) => {
                        tracing::warn!(
                            chapter = chapter.name.as_str(),
                            error = %e,
                            "Failed to store question, continuing"
                        );
                        result.failed_count += 1;
                        result.errors.push(format!("Chapter {}: {e}", chapter.name));
                        emit(IngestEvent::RecordFailed {
                            chapter: chapter.name.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        stage = IngestStage::Done;
        tracing::info!(
            stage = stage.as_str(),
            chapters = result.chapter_count,
            persisted = result.persisted_count,
            failed = result.failed_count,
            "Ingest run finished"
        );
        emit(IngestEvent::Completed {
            persisted: result.persisted_count,
            failed: result.failed_count,
        });

        Ok(result)
    }

    fn chapter_name(&self, captured: &str) -> Option<String> {
        non_empty(captured).or_else(|| non_empty(&self.defaults.chapter_name))
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Run over extracted pages, joined with newlines.
pub fn ingest_pages(
    runner: &IngestRunner,
    gateway: &dyn QuestionGateway,
    pages: &[PageText],
    progress_fn: Option<&dyn Fn(IngestEvent)>,
) -> Result<IngestResult, IngestError> {
    runner.run(gateway, &join_pages(pages), progress_fn)
}

/// Extract a PDF from disk and run over its text.
pub fn ingest_document(
    runner: &IngestRunner,
    gateway: &dyn QuestionGateway,
    extractor: &dyn PdfExtractor,
    path: &Path,
    progress_fn: Option<&dyn Fn(IngestEvent)>,
) -> Result<IngestResult, IngestError> {
    tracing::info!(path = %path.display(), "Loading questions from document");
    let pages = extract_file(extractor, path)?;
    ingest_pages(runner, gateway, &pages, progress_fn)
}
