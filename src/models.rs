//! Request and response models for prepdeck

use serde::{Deserialize, Serialize};

// ============================================================================
// Topics
// ============================================================================

/// A named grouping of interview questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTopicRequest {
    pub name: String,
}

/// A topic with its questions, used by the rendered pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicWithQuestions {
    #[serde(flatten)]
    pub topic: Topic,
    pub questions: Vec<Question>,
}

// ============================================================================
// Questions
// ============================================================================

/// A question/answer pair belonging to exactly one topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub answer: String,
    pub topic_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
    pub answer: String,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}
