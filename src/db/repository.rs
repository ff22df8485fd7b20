use std::str::FromStr;

use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{QuestionType, StoredQuestion};

/// Insert one question row and return its generated id.
pub fn insert_question(
    conn: &Connection,
    question_type: QuestionType,
    question_text: &str,
    answer_options: &str,
    subject_name: Option<&str>,
    chapter_name: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO questions (question_type, question_text, answer_options, subject_name, chapter_name)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            question_type.as_str(),
            question_text,
            answer_options,
            subject_name,
            chapter_name,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All stored questions in insertion order, optionally limited to one type.
pub fn list_questions(
    conn: &Connection,
    question_type: Option<QuestionType>,
) -> Result<Vec<StoredQuestion>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, question_type, question_text, answer_options, subject_name, chapter_name
         FROM questions
         WHERE ?1 IS NULL OR question_type = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![question_type.map(|t| t.as_str())], |row| {
        Ok(QuestionRow {
            id: row.get::<_, i64>(0)?,
            question_type: row.get::<_, String>(1)?,
            question_text: row.get::<_, String>(2)?,
            answer_options: row.get::<_, Option<String>>(3)?,
            subject_name: row.get::<_, Option<String>>(4)?,
            chapter_name: row.get::<_, Option<String>>(5)?,
        })
    })?;

    let mut questions = Vec::new();
    for row in rows {
        questions.push(question_from_row(row?)?);
    }
    Ok(questions)
}

pub fn count_questions(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
    Ok(count)
}

/// Per-type totals, in `QuestionType::all()` order. Types with no rows report 0.
pub fn count_by_type(conn: &Connection) -> Result<Vec<(QuestionType, i64)>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM questions WHERE question_type = ?1")?;
    let mut counts = Vec::with_capacity(QuestionType::all().len());
    for ty in QuestionType::all() {
        let n: i64 = stmt.query_row(params![ty.as_str()], |row| row.get(0))?;
        counts.push((*ty, n));
    }
    Ok(counts)
}

struct QuestionRow {
    id: i64,
    question_type: String,
    question_text: String,
    answer_options: Option<String>,
    subject_name: Option<String>,
    chapter_name: Option<String>,
}

fn question_from_row(row: QuestionRow) -> Result<StoredQuestion, DatabaseError> {
    Ok(StoredQuestion {
        id: row.id,
        question_type: QuestionType::from_str(&row.question_type)?,
        question_text: row.question_text,
        answer_options: row.answer_options,
        subject_name: row.subject_name,
        chapter_name: row.chapter_name,
    })
}
