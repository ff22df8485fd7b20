//! Free-form page filtering: every match of a pattern, formatted as text.

use fancy_regex::Captures;

use super::pattern::Matcher;
use super::PatternError;

/// Format one match the way a find-all over the pattern would report it.
///
/// - no capture groups: the whole match, trimmed
/// - one group: that group, trimmed (empty if it did not participate)
/// - several groups: the non-empty groups, each trimmed, joined by `\n`
///   in capture order
pub fn flatten_captures(caps: &Captures<'_>) -> String {
    match caps.len() {
        1 => caps
            .get(0)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        2 => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        _ => caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .filter(|part| !part.is_empty())
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Every match of `matcher` in `text`, formatted with [`flatten_captures`].
pub fn filter_matches(text: &str, matcher: &Matcher) -> Result<Vec<String>, PatternError> {
    Ok(matcher
        .captures_all(text)?
        .iter()
        .map(flatten_captures)
        .collect())
}

/// Matches separated by a blank line.
pub fn render_filtered(matches: &[String]) -> String {
    matches.join("\n\n")
}
