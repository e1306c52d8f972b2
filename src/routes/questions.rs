//! Question routes

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ServerError, ServerResult};
use crate::models::{CreateQuestionRequest, Question};
use crate::state::AppState;

/// POST /topics/:topic_id/questions/ - Create a question under a topic
pub async fn create_question(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Json(req): Json<CreateQuestionRequest>,
) -> ServerResult<Json<Question>> {
    let question = state.db.create_question(topic_id, &req)?;
    Ok(Json(question))
}

/// DELETE /questions/:question_id - Delete a single question
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> ServerResult<Json<serde_json::Value>> {
    let deleted = state.db.delete_question(question_id)?;

    if !deleted {
        return Err(ServerError::NotFound("Question not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Question deleted successfully"
    })))
}
