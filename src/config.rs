use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pipeline::ingest::RecordDefaults;

/// Application-level constants
pub const APP_NAME: &str = "QuestionBank";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subject recorded when the configuration names none.
pub const DEFAULT_SUBJECT: &str = "Unknown Subject";

/// Get the application data directory (`~/QuestionBank/`).
/// Falls back to the working directory when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

pub fn default_config_path() -> PathBuf {
    app_data_dir().join("config.json")
}

pub fn default_database_path() -> PathBuf {
    app_data_dir().join("questions.db")
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "question_bank=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration must contain a non-empty '{0}'")]
    MissingKey(&'static str),
}

/// Settings for extraction and authoring. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestConfig {
    #[serde(default, alias = "chapter_regex")]
    pub chapter_pattern: Option<String>,

    #[serde(default, alias = "regex")]
    pub question_pattern: Option<String>,

    #[serde(default = "default_subject", alias = "subject_name")]
    pub default_subject: String,

    #[serde(default, alias = "chapter_name")]
    pub default_chapter: String,

    /// SQLite file; `default_database_path()` when absent.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chapter_pattern: None,
            question_pattern: None,
            default_subject: default_subject(),
            default_chapter: String::new(),
            database: None,
        }
    }
}

impl IngestConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Both patterns, required for bulk extraction.
    pub fn require_patterns(&self) -> Result<(&str, &str), ConfigError> {
        let chapter = non_blank(&self.chapter_pattern).ok_or(ConfigError::MissingKey("chapter_pattern"))?;
        let question =
            non_blank(&self.question_pattern).ok_or(ConfigError::MissingKey("question_pattern"))?;
        Ok((chapter, question))
    }

    pub fn record_defaults(&self) -> RecordDefaults {
        RecordDefaults {
            subject_name: self.default_subject.clone(),
            chapter_name: self.default_chapter.clone(),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with(APP_NAME));
        assert!(default_config_path().starts_with(app_data_dir()));
        assert!(default_database_path().ends_with("questions.db"));
    }

    #[test]
    fn reads_canonical_keys() {
        let config = IngestConfig::from_json_str(
            r#"{
                "chapter_pattern": "^Chapter: (?P<chapter>.+)$",
                "question_pattern": "Q: (?P<question>.*?)(?P<options>A\\).*)",
                "default_subject": "Chemistry",
                "default_chapter": "General"
            }"#,
        )
        .unwrap();

        let (chapter, question) = config.require_patterns().unwrap();
        assert_eq!(chapter, "^Chapter: (?P<chapter>.+)$");
        assert_eq!(question, r"Q: (?P<question>.*?)(?P<options>A\).*)");
        assert_eq!(config.record_defaults().subject_name, "Chemistry");
        assert_eq!(config.record_defaults().chapter_name, "General");
    }

    #[test]
    fn reads_legacy_key_names() {
        let config = IngestConfig::from_json_str(
            r#"{"chapter_regex": "c(?P<chapter>x)", "regex": "q", "subject_name": "Physics", "chapter_name": "Optics"}"#,
        )
        .unwrap();
        assert_eq!(config.chapter_pattern.as_deref(), Some("c(?P<chapter>x)"));
        assert_eq!(config.question_pattern.as_deref(), Some("q"));
        assert_eq!(config.default_subject, "Physics");
        assert_eq!(config.default_chapter, "Optics");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = IngestConfig::from_json_str(
            r#"{"db": {"host": "localhost", "port": 3306}, "theme": "dark"}"#,
        )
        .unwrap();
        assert_eq!(config, IngestConfig::default());
    }

    #[test]
    fn missing_subject_uses_fallback() {
        let config = IngestConfig::from_json_str("{}").unwrap();
        assert_eq!(config.default_subject, DEFAULT_SUBJECT);
        assert_eq!(config.default_chapter, "");
    }

    #[test]
    fn missing_chapter_pattern_is_reported() {
        let config = IngestConfig::from_json_str(r#"{"question_pattern": "q"}"#).unwrap();
        assert!(matches!(
            config.require_patterns(),
            Err(ConfigError::MissingKey("chapter_pattern"))
        ));
    }

    #[test]
    fn blank_question_pattern_is_missing() {
        let config =
            IngestConfig::from_json_str(r#"{"chapter_pattern": "c", "question_pattern": "  "}"#)
                .unwrap();
        assert!(matches!(
            config.require_patterns(),
            Err(ConfigError::MissingKey("question_pattern"))
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            IngestConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"database": "/tmp/q.db"}"#).unwrap();

        let config = IngestConfig::load(&path).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/q.db"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = IngestConfig::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn database_defaults_under_app_dir() {
        assert_eq!(IngestConfig::default().database_path(), default_database_path());
    }
}
