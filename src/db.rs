//! SQLite database layer for prepdeck
//!
//! Uses rusqlite with schema bootstrap on startup. Identifiers are
//! assigned by SQLite and never reused by the application.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{ServerError, ServerResult};
use crate::models::*;

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Run schema migrations
    fn run_migrations(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(INDEXES)?;

        Ok(())
    }

    // ========================================================================
    // Topics
    // ========================================================================

    pub fn create_topic(&self, req: &CreateTopicRequest) -> ServerResult<Topic> {
        let conn = self.conn.lock().unwrap();

        conn.execute("INSERT INTO topics (name) VALUES (?)", params![req.name])?;
        let id = conn.last_insert_rowid();

        Ok(Topic {
            id,
            name: req.name.clone(),
        })
    }

    /// List all topics in insertion order, without their questions
    pub fn list_topics(&self) -> ServerResult<Vec<Topic>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name FROM topics ORDER BY id ASC")?;

        let topics = stmt
            .query_map([], |row| {
                Ok(Topic {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(topics)
    }

    pub fn get_topic(&self, topic_id: i64) -> ServerResult<Option<Topic>> {
        let conn = self.conn.lock().unwrap();

        let topic = conn
            .query_row(
                "SELECT id, name FROM topics WHERE id = ?",
                params![topic_id],
                |row| {
                    Ok(Topic {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(topic)
    }

    /// List topics with their questions, for page rendering
    pub fn list_topics_with_questions(&self) -> ServerResult<Vec<TopicWithQuestions>> {
        let conn = self.conn.lock().unwrap();

        let mut topic_stmt = conn.prepare("SELECT id, name FROM topics ORDER BY id ASC")?;
        let topics = topic_stmt
            .query_map([], |row| {
                Ok(Topic {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut question_stmt = conn.prepare(
            "SELECT id, text, answer, topic_id FROM questions WHERE topic_id = ? ORDER BY id ASC",
        )?;

        let mut result = Vec::with_capacity(topics.len());
        for topic in topics {
            let questions = question_stmt
                .query_map(params![topic.id], |row| {
                    Ok(Question {
                        id: row.get(0)?,
                        text: row.get(1)?,
                        answer: row.get(2)?,
                        topic_id: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            result.push(TopicWithQuestions { topic, questions });
        }

        Ok(result)
    }

    /// Delete a topic and all its questions in one transaction.
    ///
    /// Cascade is enforced here, not in the schema: dependent question
    /// rows are removed atomically with the topic row. Returns whether
    /// a topic row was actually deleted.
    pub fn delete_topic(&self, topic_id: i64) -> ServerResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM questions WHERE topic_id = ?",
            params![topic_id],
        )?;
        let rows_affected = tx.execute("DELETE FROM topics WHERE id = ?", params![topic_id])?;

        tx.commit()?;

        Ok(rows_affected > 0)
    }

    // ========================================================================
    // Questions
    // ========================================================================

    pub fn create_question(
        &self,
        topic_id: i64,
        req: &CreateQuestionRequest,
    ) -> ServerResult<Question> {
        let conn = self.conn.lock().unwrap();

        // Verify topic exists before insert
        let topic_exists: bool = conn
            .query_row(
                "SELECT 1 FROM topics WHERE id = ?",
                params![topic_id],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if !topic_exists {
            return Err(ServerError::NotFound("Topic not found".to_string()));
        }

        conn.execute(
            "INSERT INTO questions (text, answer, topic_id) VALUES (?, ?, ?)",
            params![req.text, req.answer, topic_id],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Question {
            id,
            text: req.text.clone(),
            answer: req.answer.clone(),
            topic_id,
        })
    }

    pub fn get_question(&self, question_id: i64) -> ServerResult<Option<Question>> {
        let conn = self.conn.lock().unwrap();

        let question = conn
            .query_row(
                "SELECT id, text, answer, topic_id FROM questions WHERE id = ?",
                params![question_id],
                |row| {
                    Ok(Question {
                        id: row.get(0)?,
                        text: row.get(1)?,
                        answer: row.get(2)?,
                        topic_id: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(question)
    }

    pub fn delete_question(&self, question_id: i64) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected =
            conn.execute("DELETE FROM questions WHERE id = ?", params![question_id])?;

        Ok(rows_affected > 0)
    }
}

// ============================================================================
// Schema
// ============================================================================

const SCHEMA: &str = r#"
-- Topics table
CREATE TABLE IF NOT EXISTS topics (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Questions table
CREATE TABLE IF NOT EXISTS questions (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    text     TEXT NOT NULL,
    answer   TEXT NOT NULL,
    topic_id INTEGER NOT NULL REFERENCES topics(id)
);
"#;

const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_questions_topic ON questions(topic_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(db: &Database, name: &str) -> Topic {
        db.create_topic(&CreateTopicRequest {
            name: name.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn create_and_list_topics() {
        let db = Database::open_in_memory().unwrap();

        let created = topic(&db, "Algorithms");
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Algorithms");

        topic(&db, "System Design");

        let topics = db.list_topics().unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].name, "Algorithms");
        assert_eq!(topics[1].name, "System Design");
        // Insertion order
        assert!(topics[0].id < topics[1].id);
    }

    #[test]
    fn create_question_requires_topic() {
        let db = Database::open_in_memory().unwrap();

        let err = db
            .create_question(
                9999,
                &CreateQuestionRequest {
                    text: "What is Big-O?".to_string(),
                    answer: "Asymptotic complexity".to_string(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, ServerError::NotFound(ref msg) if msg == "Topic not found"));

        // No row was inserted
        assert!(db.get_question(1).unwrap().is_none());
    }

    #[test]
    fn delete_topic_cascades_to_questions() {
        let db = Database::open_in_memory().unwrap();

        let t = topic(&db, "Algorithms");
        let q = db
            .create_question(
                t.id,
                &CreateQuestionRequest {
                    text: "What is Big-O?".to_string(),
                    answer: "Asymptotic complexity".to_string(),
                },
            )
            .unwrap();

        assert!(db.delete_topic(t.id).unwrap());

        assert!(db.get_topic(t.id).unwrap().is_none());
        assert!(db.get_question(q.id).unwrap().is_none());
        assert!(db.list_topics().unwrap().is_empty());
    }

    #[test]
    fn delete_missing_rows_reports_false() {
        let db = Database::open_in_memory().unwrap();

        assert!(!db.delete_topic(42).unwrap());
        assert!(!db.delete_question(42).unwrap());
    }

    #[test]
    fn topics_with_questions_groups_by_owner() {
        let db = Database::open_in_memory().unwrap();

        let a = topic(&db, "Algorithms");
        let b = topic(&db, "Databases");

        db.create_question(
            a.id,
            &CreateQuestionRequest {
                text: "What is Big-O?".to_string(),
                answer: "Asymptotic complexity".to_string(),
            },
        )
        .unwrap();
        db.create_question(
            b.id,
            &CreateQuestionRequest {
                text: "What is an index?".to_string(),
                answer: "A lookup structure".to_string(),
            },
        )
        .unwrap();

        let all = db.list_topics_with_questions().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].questions.len(), 1);
        assert_eq!(all[0].questions[0].topic_id, a.id);
        assert_eq!(all[1].questions[0].topic_id, b.id);
    }

    #[test]
    fn open_creates_file_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prepdeck.db");

        {
            let db = Database::open(&path).unwrap();
            topic(&db, "Persisted");
        }

        let db = Database::open(&path).unwrap();
        let topics = db.list_topics().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].name, "Persisted");
        assert!(db.size_bytes().unwrap() > 0);
    }
}
