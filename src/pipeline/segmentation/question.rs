use serde::Serialize;

use fancy_regex::Captures;

use super::pattern::{Matcher, OPTIONS_GROUP, QUESTION_GROUP};
use super::PatternError;

/// Trimmed `question` / `options` captures of one question match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawQuestionMatch {
    pub question_text: String,
    pub option_text: String,
}

/// All question matches inside one chapter, in source order.
///
/// A match whose `question` group is empty (or did not participate) is
/// still returned with an empty `question_text`; dropping such matches is
/// left to the caller.
pub fn extract(
    chapter_text: &str,
    question_matcher: &Matcher,
) -> Result<Vec<RawQuestionMatch>, PatternError> {
    Ok(question_matcher
        .captures_all(chapter_text)?
        .iter()
        .map(|caps| RawQuestionMatch {
            question_text: group_text(caps, QUESTION_GROUP),
            option_text: group_text(caps, OPTIONS_GROUP),
        })
        .collect())
}

fn group_text(caps: &Captures<'_>, group: &str) -> String {
    caps.name(group)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
