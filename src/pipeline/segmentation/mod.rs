//! Pattern-driven segmentation of document text.
//!
//! ```text
//! document text ─► segment (chapter matcher) ─► ChapterSegment*
//!                                               │
//!                   extract (question matcher) ◄┘ ─► RawQuestionMatch*
//! ```
//!
//! Patterns are compiled once into `Matcher`s and reused for every
//! chapter of every document. Segmentation and extraction are pure
//! functions of their inputs.

pub mod pattern;
pub mod chapter;
pub mod question;
pub mod filter;

pub use pattern::*;
pub use chapter::*;
pub use question::*;
pub use filter::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("The {name} pattern is empty")]
    Empty { name: String },

    #[error("Invalid {name} pattern: {reason}")]
    Invalid { name: String, reason: String },

    #[error("The {name} pattern has no named group '{group}'")]
    MissingGroup { name: String, group: String },

    #[error("Matching the {name} pattern failed: {reason}")]
    Matching { name: String, reason: String },
}
