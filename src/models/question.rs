//! Question records: one closed set of shapes, each owning its option
//! formatting and type tag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enums::QuestionType;
use crate::pipeline::ingest::{PersistError, QuestionGateway};

/// Fixed answer set for true/false questions, in display order.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// Minimum number of non-empty choices for an authored multiple-choice question.
pub const MIN_AUTHORED_CHOICES: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Question text cannot be empty")]
    EmptyQuestionText,

    #[error("Multiple choice questions need at least 2 non-empty choices, got {found}")]
    TooFewChoices { found: usize },
}

/// Shape-specific data of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    Subjective,
    TrueFalse,
    MultipleChoice { choices: Vec<String> },
}

/// A question ready to be written through a `QuestionGateway`.
///
/// The shape is fixed at construction; there is no way to change the
/// kind of an existing record. Records are only built through the
/// constructors below, never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    kind: QuestionKind,
    pub question_text: String,
    pub subject_name: Option<String>,
    pub chapter_name: Option<String>,
}

impl QuestionRecord {
    /// Subjective (long answer) question.
    pub fn subjective(
        question_text: impl Into<String>,
        subject_name: Option<String>,
        chapter_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        Self::authored(QuestionKind::Subjective, question_text.into(), subject_name, chapter_name)
    }

    /// True/False question; options are always `True` then `False`.
    pub fn true_false(
        question_text: impl Into<String>,
        subject_name: Option<String>,
        chapter_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        Self::authored(QuestionKind::TrueFalse, question_text.into(), subject_name, chapter_name)
    }

    /// Multiple-choice question entered by hand.
    ///
    /// Choices are trimmed and blank entries dropped; fewer than
    /// [`MIN_AUTHORED_CHOICES`] remaining is a `ValidationError`.
    pub fn multiple_choice<I, S>(
        question_text: impl Into<String>,
        choices: I,
        subject_name: Option<String>,
        chapter_name: Option<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let choices: Vec<String> = choices
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if choices.len() < MIN_AUTHORED_CHOICES {
            return Err(ValidationError::TooFewChoices {
                found: choices.len(),
            });
        }

        Self::authored(
            QuestionKind::MultipleChoice { choices },
            question_text.into(),
            subject_name,
            chapter_name,
        )
    }

    /// Multiple-choice question found by bulk extraction.
    ///
    /// The captured option text is kept as one opaque choice; nothing is
    /// split or validated, and an empty question text is accepted as-is.
    pub fn extracted(
        question_text: impl Into<String>,
        options_text: impl Into<String>,
        subject_name: Option<String>,
        chapter_name: Option<String>,
    ) -> Self {
        let options_text = options_text.into();
        let choices = if options_text.is_empty() {
            Vec::new()
        } else {
            vec![options_text]
        };

        Self {
            kind: QuestionKind::MultipleChoice { choices },
            question_text: question_text.into(),
            subject_name,
            chapter_name,
        }
    }

    fn authored(
        kind: QuestionKind,
        question_text: String,
        subject_name: Option<String>,
        chapter_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let question_text = question_text.trim().to_string();
        if question_text.is_empty() {
            return Err(ValidationError::EmptyQuestionText);
        }
        Ok(Self {
            kind,
            question_text,
            subject_name,
            chapter_name,
        })
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::Subjective => QuestionType::Subjective,
            QuestionKind::TrueFalse => QuestionType::TrueFalse,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        self.question_type().as_str()
    }

    /// Options as stored in the `answer_options` column.
    pub fn formatted_options(&self) -> String {
        match &self.kind {
            QuestionKind::Subjective => String::new(),
            QuestionKind::TrueFalse => TRUE_FALSE_OPTIONS.join("\n"),
            QuestionKind::MultipleChoice { choices } => choices.join("\n"),
        }
    }

    /// Write this record through the gateway. Failures come back as a
    /// value so the caller can move on to the next record.
    pub fn persist(&self, gateway: &dyn QuestionGateway) -> Result<(), PersistError> {
        gateway.insert_question(
            self.type_tag(),
            &self.question_text,
            &self.formatted_options(),
            self.subject_name.as_deref(),
            self.chapter_name.as_deref(),
        )
    }
}

/// A row read back from the `questions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: i64,
    pub question_type: QuestionType,
    pub question_text: String,
    pub answer_options: Option<String>,
    pub subject_name: Option<String>,
    pub chapter_name: Option<String>,
}
