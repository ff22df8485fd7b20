//! Error types for question ingestion.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DatabaseError;
use crate::models::ValidationError;
use crate::pipeline::extraction::ExtractionError;
use crate::pipeline::segmentation::PatternError;

/// A gateway call that did not complete.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Question table is not available or could not be created: {0}")]
    Schema(#[source] DatabaseError),

    #[error("Failed to insert question: {0}")]
    Insert(#[source] DatabaseError),
}

/// Fatal errors for one bulk extraction run.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Schema error: {0}")]
    Schema(PersistError),
}

/// Errors from the authoring path.
#[derive(Error, Debug)]
pub enum AuthoringError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Persist failed: {0}")]
    Persist(#[from] PersistError),
}
