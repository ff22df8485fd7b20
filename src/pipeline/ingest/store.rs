//! SQLite-backed question gateway.

use std::path::Path;
use std::str::FromStr;

use rusqlite::Connection;

use super::error::PersistError;
use super::traits::QuestionGateway;
use crate::db::{self, DatabaseError};
use crate::models::QuestionType;

/// Owns one connection for the lifetime of a run.
pub struct SqliteQuestionStore {
    conn: Connection,
}

impl SqliteQuestionStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(db::open_database(path)?))
    }

    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(db::open_memory_database()?))
    }

    /// Read access for reporting and verification.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl QuestionGateway for SqliteQuestionStore {
    fn ensure_schema(&self) -> Result<(), PersistError> {
        db::run_migrations(&self.conn).map_err(PersistError::Schema)
    }

    fn insert_question(
        &self,
        type_tag: &str,
        question_text: &str,
        options_text: &str,
        subject_name: Option<&str>,
        chapter_name: Option<&str>,
    ) -> Result<(), PersistError> {
        let question_type = QuestionType::from_str(type_tag).map_err(PersistError::Insert)?;
        let id = db::insert_question(
            &self.conn,
            question_type,
            question_text,
            options_text,
            subject_name,
            chapter_name,
        )
        .map_err(PersistError::Insert)?;

        tracing::debug!(id, question_type = type_tag, "Stored question");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_tables, list_questions};

    fn ready_store() -> SqliteQuestionStore {
        let store = SqliteQuestionStore::in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn ensure_schema_twice_is_harmless() {
        let store = SqliteQuestionStore::in_memory().unwrap();
        store.ensure_schema().unwrap();
        let tables = count_tables(store.connection()).unwrap();

        assert!(store.ensure_schema().is_ok());
        assert_eq!(count_tables(store.connection()).unwrap(), tables);
    }

    #[test]
    fn insert_writes_one_row() {
        let store = ready_store();
        store
            .insert_question("MULTIPLE_CHOICE", "pH of water?", "1\n7", Some("Chemistry"), Some("Acids"))
            .unwrap();

        let rows = list_questions(store.connection(), None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(rows[0].answer_options.as_deref(), Some("1\n7"));
    }

    #[test]
    fn unknown_type_tag_is_insert_error() {
        let store = ready_store();
        let result = store.insert_question("ESSAY", "Explain.", "", None, None);
        assert!(matches!(
            result,
            Err(PersistError::Insert(DatabaseError::InvalidEnum { .. }))
        ));
    }

    #[test]
    fn insert_before_schema_is_insert_error() {
        let store = SqliteQuestionStore::in_memory().unwrap();
        let result = store.insert_question("SUBJECTIVE", "Explain.", "", None, None);
        assert!(matches!(result, Err(PersistError::Insert(DatabaseError::Sqlite(_)))));
    }

    #[test]
    fn over_long_chapter_name_is_rejected_not_panicked() {
        let store = ready_store();
        let chapter = "c".repeat(300);
        let result = store.insert_question("SUBJECTIVE", "Explain.", "", None, Some(&chapter));
        assert!(matches!(result, Err(PersistError::Insert(_))));
    }

    #[test]
    fn file_store_persists_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.db");
        {
            let store = SqliteQuestionStore::open(&path).unwrap();
            store.ensure_schema().unwrap();
            store
                .insert_question("TRUE_FALSE", "Salt is ionic.", "True\nFalse", None, None)
                .unwrap();
        }
        let store = SqliteQuestionStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(list_questions(store.connection(), None).unwrap().len(), 1);
    }
}
