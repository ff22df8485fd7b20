use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_questions.sql"),
)];

/// Open a SQLite connection to the given path.
/// The schema is not touched; callers run `run_migrations` (usually via
/// `QuestionGateway::ensure_schema`) before the first insert.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations. Safe to call any number of times.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    for &(version, sql) in MIGRATIONS {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
pub fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest_version() -> i64 {
        MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
    }

    fn migrated() -> Connection {
        let conn = open_memory_database().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn fresh_database_has_no_schema() {
        let conn = open_memory_database().unwrap();
        assert_eq!(count_tables(&conn).unwrap(), 0);
        assert_eq!(get_current_version(&conn), 0);
    }

    #[test]
    fn migrations_create_questions_and_version_tables() {
        let conn = migrated();
        assert_eq!(count_tables(&conn).unwrap(), 2);
        assert_eq!(get_current_version(&conn), latest_version());
    }

    #[test]
    fn migration_idempotent() {
        let conn = migrated();
        // Second run must neither fail nor duplicate anything
        assert!(run_migrations(&conn).is_ok());
        assert_eq!(count_tables(&conn).unwrap(), 2);

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn question_type_index_exists() {
        let conn = migrated();
        let idx: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name='idx_questions_type'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn question_type_is_checked() {
        let conn = migrated();
        let result = conn.execute(
            "INSERT INTO questions (question_type, question_text) VALUES ('ESSAY', 'x')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn subject_name_length_is_bounded() {
        let conn = migrated();
        let long = "s".repeat(256);
        let result = conn.execute(
            "INSERT INTO questions (question_type, question_text, subject_name) VALUES ('SUBJECTIVE', 'x', ?1)",
            [long],
        );
        assert!(result.is_err());
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.db");
        {
            let conn = open_database(&path).unwrap();
            run_migrations(&conn).unwrap();
        }
        let conn = open_database(&path).unwrap();
        assert_eq!(get_current_version(&conn), latest_version());
    }
}
