//! Application state shared across handlers

use std::time::Instant;

use crate::db::Database;
use crate::render::Renderer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub renderer: Renderer,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Database, renderer: Renderer) -> Self {
        Self {
            db,
            renderer,
            start_time: Instant::now(),
        }
    }
}
