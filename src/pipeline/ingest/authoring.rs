//! Manual question entry.
//!
//! `author_question` validates and stores one draft. `AuthoringSession`
//! wraps it in a prompt loop over any reader/writer pair, so the same
//! flow drives a terminal or a test.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use super::error::AuthoringError;
use super::traits::QuestionGateway;
use super::types::RecordDefaults;
use crate::models::{QuestionRecord, QuestionType, MIN_AUTHORED_CHOICES};

/// A question as typed in by a user, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_type: QuestionType,
    pub question_text: String,
    pub subject_name: Option<String>,
    pub chapter_name: Option<String>,
    /// Only read for multiple-choice drafts.
    #[serde(default)]
    pub choices: Vec<String>,
}

impl QuestionDraft {
    pub fn into_record(self) -> Result<QuestionRecord, crate::models::ValidationError> {
        match self.question_type {
            QuestionType::Subjective => {
                QuestionRecord::subjective(self.question_text, self.subject_name, self.chapter_name)
            }
            QuestionType::TrueFalse => {
                QuestionRecord::true_false(self.question_text, self.subject_name, self.chapter_name)
            }
            QuestionType::MultipleChoice => QuestionRecord::multiple_choice(
                self.question_text,
                self.choices,
                self.subject_name,
                self.chapter_name,
            ),
        }
    }
}

/// Validate a draft and store it. Returns the stored type.
pub fn author_question(
    gateway: &dyn QuestionGateway,
    draft: QuestionDraft,
) -> Result<QuestionType, AuthoringError> {
    let record = draft.into_record()?;
    record.persist(gateway)?;
    Ok(record.question_type())
}

/// Totals for one interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthoringSummary {
    pub stored: u32,
    pub failed: u32,
    pub rejected: u32,
}

pub struct AuthoringSession<R, W> {
    input: R,
    output: W,
    defaults: RecordDefaults,
}

impl<R: BufRead, W: Write> AuthoringSession<R, W> {
    pub fn new(input: R, output: W, defaults: RecordDefaults) -> Self {
        Self {
            input,
            output,
            defaults,
        }
    }

    /// Menu loop until the user exits or input ends.
    pub fn run(&mut self, gateway: &dyn QuestionGateway) -> Result<AuthoringSummary, AuthoringError> {
        gateway.ensure_schema()?;
        let mut summary = AuthoringSummary::default();

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Select option (1-4): ")? else {
                break;
            };

            let question_type = match choice.as_str() {
                "1" => QuestionType::Subjective,
                "2" => QuestionType::TrueFalse,
                "3" => QuestionType::MultipleChoice,
                "4" => {
                    writeln!(self.output, "Goodbye.")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "Invalid option. Please enter 1, 2, 3, or 4.")?;
                    continue;
                }
            };

            let Some(draft) = self.read_draft(question_type)? else {
                break;
            };

            match author_question(gateway, draft) {
                Ok(stored) => {
                    summary.stored += 1;
                    writeln!(self.output, "Question stored successfully ({stored}).")?;
                }
                Err(AuthoringError::Validation(e)) => {
                    summary.rejected += 1;
                    writeln!(self.output, "Invalid question: {e}")?;
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(error = %e, "Failed to store authored question");
                    writeln!(self.output, "Failed to store question: {e}")?;
                }
            }
        }

        tracing::info!(
            stored = summary.stored,
            failed = summary.failed,
            rejected = summary.rejected,
            "Authoring session ended"
        );
        Ok(summary)
    }

    fn print_menu(&mut self) -> Result<(), AuthoringError> {
        let rule = "=".repeat(50);
        writeln!(self.output, "\n{rule}\n  Question Management\n{rule}")?;
        writeln!(self.output, "  1. Add Subjective question (long answer)")?;
        writeln!(self.output, "  2. Add True/False question")?;
        writeln!(self.output, "  3. Add Multiple choice question")?;
        writeln!(self.output, "  4. Exit\n{rule}")?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn read_draft(&mut self, question_type: QuestionType) -> Result<Option<QuestionDraft>, AuthoringError> {
        let Some(question_text) = self.prompt_non_empty("Enter the question text: ")? else {
            return Ok(None);
        };

        let subject_prompt = format!("Subject name [default: {}]: ", self.defaults.subject_name);
        let Some(subject) = self.prompt(&subject_prompt)? else {
            return Ok(None);
        };
        let chapter_prompt = format!("Chapter name [default: {}]: ", self.defaults.chapter_name);
        let Some(chapter) = self.prompt(&chapter_prompt)? else {
            return Ok(None);
        };

        let choices = if question_type == QuestionType::MultipleChoice {
            match self.read_choices()? {
                Some(choices) => choices,
                None => return Ok(None),
            }
        } else {
            Vec::new()
        };

        Ok(Some(QuestionDraft {
            question_type,
            question_text,
            subject_name: or_default(subject, &self.defaults.subject_name),
            chapter_name: or_default(chapter, &self.defaults.chapter_name),
            choices,
        }))
    }

    fn read_choices(&mut self) -> Result<Option<Vec<String>>, AuthoringError> {
        writeln!(
            self.output,
            "Enter answer choices (one per line). Enter an empty line when done."
        )?;
        let mut choices = Vec::new();
        loop {
            let label = format!("  Choice {}: ", choices.len() + 1);
            let Some(choice) = self.prompt(&label)? else {
                return Ok(None);
            };
            if choice.is_empty() {
                if choices.len() < MIN_AUTHORED_CHOICES {
                    writeln!(self.output, "  Please enter at least {MIN_AUTHORED_CHOICES} choices.")?;
                    continue;
                }
                return Ok(Some(choices));
            }
            choices.push(choice);
        }
    }

    fn prompt_non_empty(&mut self, text: &str) -> Result<Option<String>, AuthoringError> {
        loop {
            match self.prompt(text)? {
                Some(value) if value.is_empty() => {
                    writeln!(self.output, "  Input cannot be empty. Please try again.")?;
                }
                other => return Ok(other),
            }
        }
    }

    /// Print `text`, read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AuthoringError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn or_default(value: String, default: &str) -> Option<String> {
    let chosen = if value.is_empty() { default.to_string() } else { value };
    if chosen.is_empty() {
        None
    } else {
        Some(chosen)
    }
}
