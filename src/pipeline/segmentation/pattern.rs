use fancy_regex::{Captures, Regex};

use super::PatternError;

/// Named group holding the chapter label.
pub const CHAPTER_GROUP: &str = "chapter";
/// Named group holding the question body.
pub const QUESTION_GROUP: &str = "question";
/// Named group holding the answer-option text.
pub const OPTIONS_GROUP: &str = "options";

/// How a pattern treats line breaks in its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `^`/`$` anchor at input ends, `.` stops at newlines.
    SingleLine,
    /// `^`/`$` anchor at every line. Used for chapter headings.
    MultiLine,
    /// `.` also matches newlines. Used for question bodies.
    DotAll,
}

impl MatchMode {
    fn flag_prefix(self) -> &'static str {
        match self {
            MatchMode::SingleLine => "",
            MatchMode::MultiLine => "(?m)",
            MatchMode::DotAll => "(?s)",
        }
    }
}

/// A compiled, reusable pattern.
///
/// Backed by a backtracking engine, so look-ahead, look-behind, `\Z` and
/// backreferences are accepted alongside `(?P<name>...)` groups.
#[derive(Debug, Clone)]
pub struct Matcher {
    name: String,
    regex: Regex,
}

/// Compile `pattern_text` under `mode`. `name` only labels errors and logs.
pub fn compile(name: &str, pattern_text: &str, mode: MatchMode) -> Result<Matcher, PatternError> {
    if pattern_text.trim().is_empty() {
        return Err(PatternError::Empty { name: name.into() });
    }

    let regex = Regex::new(&format!("{}{pattern_text}", mode.flag_prefix())).map_err(|e| {
        PatternError::Invalid {
            name: name.into(),
            reason: e.to_string(),
        }
    })?;

    tracing::debug!(pattern = name, ?mode, groups = regex.captures_len() - 1, "Compiled pattern");

    Ok(Matcher {
        name: name.into(),
        regex,
    })
}

impl Matcher {
    pub fn has_group(&self, group: &str) -> bool {
        self.regex.capture_names().flatten().any(|n| n == group)
    }

    /// Fail unless every listed named group exists in the pattern.
    pub fn require_groups(self, groups: &[&str]) -> Result<Self, PatternError> {
        if let Some(missing) = groups.iter().find(|g| !self.has_group(g)) {
            return Err(PatternError::MissingGroup {
                name: self.name,
                group: (*missing).into(),
            });
        }
        Ok(self)
    }

    /// Every non-overlapping match in `text`, in source order.
    ///
    /// Errors only when the engine gives up on the input, e.g. when the
    /// backtrack limit is exceeded.
    pub fn captures_all<'t>(&self, text: &'t str) -> Result<Vec<Captures<'t>>, PatternError> {
        self.regex
            .captures_iter(text)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PatternError::Matching {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

/// The two matchers a bulk extraction run needs.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub chapter: Matcher,
    pub question: Matcher,
}

impl PatternSet {
    /// Chapter headings match per line; question bodies may span lines.
    pub fn compile(chapter_pattern: &str, question_pattern: &str) -> Result<Self, PatternError> {
        let chapter = compile("chapter", chapter_pattern, MatchMode::MultiLine)?
            .require_groups(&[CHAPTER_GROUP])?;
        let question = compile("question", question_pattern, MatchMode::DotAll)?
            .require_groups(&[QUESTION_GROUP, OPTIONS_GROUP])?;
        Ok(Self { chapter, question })
    }
}
