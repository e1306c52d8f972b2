//! Template environment for the rendered pages
//!
//! Templates are compiled into the binary; the environment is built once
//! at startup and shared across requests.

use std::sync::Arc;

use minijinja::{context, Environment};

use crate::error::ServerResult;
use crate::models::TopicWithQuestions;

const EDITOR_TEMPLATE: &str = include_str!("../templates/index.html");
const PUBLIC_TEMPLATE: &str = include_str!("../templates/all_view.html");

/// Shared page renderer
#[derive(Clone)]
pub struct Renderer {
    env: Arc<Environment<'static>>,
}

impl Renderer {
    pub fn new() -> ServerResult<Self> {
        let mut env = Environment::new();
        env.add_template("index.html", EDITOR_TEMPLATE)?;
        env.add_template("all_view.html", PUBLIC_TEMPLATE)?;

        Ok(Self { env: Arc::new(env) })
    }

    /// Render the editor page (GET /add)
    pub fn render_editor(&self, topics: &[TopicWithQuestions]) -> ServerResult<String> {
        let tmpl = self.env.get_template("index.html")?;
        Ok(tmpl.render(context! { topics })?)
    }

    /// Render the public read-only page (GET /)
    pub fn render_public(&self, topics: &[TopicWithQuestions]) -> ServerResult<String> {
        let tmpl = self.env.get_template("all_view.html")?;
        Ok(tmpl.render(context! { topics })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, Topic};

    fn sample() -> Vec<TopicWithQuestions> {
        vec![TopicWithQuestions {
            topic: Topic {
                id: 1,
                name: "Algorithms".to_string(),
            },
            questions: vec![Question {
                id: 1,
                text: "What is Big-O?".to_string(),
                answer: "Asymptotic complexity".to_string(),
                topic_id: 1,
            }],
        }]
    }

    #[test]
    fn editor_page_lists_topics_and_questions() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render_editor(&sample()).unwrap();

        assert!(html.contains("Algorithms"));
        assert!(html.contains("What is Big-O?"));
        assert!(html.contains("Asymptotic complexity"));
    }

    #[test]
    fn public_page_lists_topics() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render_public(&sample()).unwrap();

        assert!(html.contains("Algorithms"));
        assert!(html.contains("What is Big-O?"));
    }

    #[test]
    fn pages_render_with_no_topics() {
        let renderer = Renderer::new().unwrap();
        assert!(renderer.render_editor(&[]).is_ok());
        assert!(renderer.render_public(&[]).is_ok());
    }
}
