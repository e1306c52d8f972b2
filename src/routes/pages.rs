//! Rendered page routes - editor and public views

use axum::{extract::State, response::Html};

use crate::error::ServerResult;
use crate::state::AppState;

/// GET /add - Editor page listing all topics and questions
pub async fn editor_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let topics = state.db.list_topics_with_questions()?;
    let html = state.renderer.render_editor(&topics)?;
    Ok(Html(html))
}

/// GET / - Public read-only page
pub async fn public_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let topics = state.db.list_topics_with_questions()?;
    let html = state.renderer.render_public(&topics)?;
    Ok(Html(html))
}
