use serde::Serialize;

/// Where a bulk extraction run currently is. Runs only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    Idle,
    SchemaEnsured,
    Segmented,
    Done,
}

impl IngestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SchemaEnsured => "schema_ensured",
            Self::Segmented => "segmented",
            Self::Done => "done",
        }
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IngestEvent {
    Stage { stage: IngestStage },
    ChapterStarted { index: usize, name: String, question_count: usize },
    RecordFailed { chapter: String, error: String },
    Completed { persisted: u32, failed: u32 },
}

/// Fallbacks applied to every extracted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefaults {
    pub subject_name: String,
    /// Used when a chapter heading captured an empty name.
    pub chapter_name: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            subject_name: crate::config::DEFAULT_SUBJECT.into(),
            chapter_name: String::new(),
        }
    }
}

/// Outcome of one bulk extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestResult {
    pub persisted_count: u32,
    pub failed_count: u32,
    pub chapter_count: u32,
    pub errors: Vec<String>,
}

impl IngestResult {
    pub fn empty() -> Self {
        Self {
            persisted_count: 0,
            failed_count: 0,
            chapter_count: 0,
            errors: Vec::new(),
        }
    }

    /// Records the run attempted to persist.
    pub fn attempted(&self) -> u32 {
        self.persisted_count + self.failed_count
    }
}
