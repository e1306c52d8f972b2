//! prepdeck: HTTP server for interview-prep content
//!
//! Topics own question/answer pairs. JSON CRUD endpoints plus two
//! server-rendered study pages backed by a local SQLite database.

pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use db::Database;
pub use error::{ServerError, ServerResult};
pub use server::{run_server, ServerArgs};
pub use state::AppState;
