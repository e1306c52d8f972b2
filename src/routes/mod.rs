//! Route handlers for prepdeck
//!
//! Organized by resource type:
//! - topics: Topic CRUD
//! - questions: Question creation and deletion
//! - pages: Server-rendered editor and public views
//! - health: Health check endpoint

pub mod health;
pub mod pages;
pub mod questions;
pub mod topics;

pub use health::*;
pub use pages::*;
pub use questions::*;
pub use topics::*;
