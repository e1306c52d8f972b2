//! Topic routes

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ServerError, ServerResult};
use crate::models::{CreateTopicRequest, Topic};
use crate::state::AppState;

/// POST /topics/ - Create a new topic
pub async fn create_topic(
    State(state): State<AppState>,
    Json(req): Json<CreateTopicRequest>,
) -> ServerResult<Json<Topic>> {
    let topic = state.db.create_topic(&req)?;
    Ok(Json(topic))
}

/// GET /topics/ - List all topics in insertion order
///
/// The listing payload carries id and name only; questions are never
/// nested here.
pub async fn list_topics(State(state): State<AppState>) -> ServerResult<Json<Vec<Topic>>> {
    let topics = state.db.list_topics()?;
    Ok(Json(topics))
}

/// DELETE /delete-topic/:topic_id - Delete a topic and its questions
pub async fn delete_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> ServerResult<Json<serde_json::Value>> {
    let topic = state.db.get_topic(topic_id)?;
    tracing::debug!(topic_id, found = topic.is_some(), "delete-topic lookup");

    if topic.is_none() {
        return Err(ServerError::NotFound("Topic not found".to_string()));
    }

    state.db.delete_topic(topic_id)?;

    Ok(Json(serde_json::json!({
        "message": "Topic deleted"
    })))
}
