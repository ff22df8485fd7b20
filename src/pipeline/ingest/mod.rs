//! Question ingestion.
//!
//! Two paths write through the same `QuestionGateway`:
//! ```text
//! bulk:        document text → segment → extract → QuestionRecord::extracted → persist
//! authoring:   prompts → QuestionRecord::{subjective, true_false, multiple_choice} → persist
//! ```
//! Both run synchronously, one record at a time, and isolate failures at
//! the record boundary. Only a schema failure stops a run.

pub mod error;
pub mod traits;
pub mod store;
pub mod types;
pub mod runner;
pub mod authoring;

pub use error::*;
pub use traits::QuestionGateway;
pub use store::SqliteQuestionStore;
pub use types::*;
pub use runner::{ingest_document, ingest_pages, IngestRunner};
pub use authoring::{author_question, AuthoringSession, AuthoringSummary, QuestionDraft};
