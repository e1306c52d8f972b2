//! Main server module - Axum setup and router configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::Database;
use crate::render::Renderer;
use crate::routes;
use crate::state::AppState;

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Database file path
    #[arg(long, default_value = "interview.db")]
    pub db_path: PathBuf,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 8000,
            bind: "127.0.0.1".to_string(),
            db_path: PathBuf::from("interview.db"),
            static_dir: PathBuf::from("static"),
            timeout: 30,
            debug: false,
        }
    }
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    info!("Opening database at {}", args.db_path.display());
    let db = Database::open(&args.db_path)?;
    let renderer = Renderer::new()?;

    let state = AppState::new(db, renderer);
    let app = create_router(state, &args.static_dir, args.timeout);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    info!("Starting prepdeck on http://{}", addr);
    info!("Database: {}", args.db_path.display());

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(state: AppState, static_dir: &std::path::Path, timeout_secs: u64) -> Router {
    // CORS layer for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Middleware stack
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    Router::new()
        // Health
        .route("/health", get(routes::health_check))
        // Topics
        .route(
            "/topics/",
            get(routes::list_topics).post(routes::create_topic),
        )
        .route("/delete-topic/{topic_id}", delete(routes::delete_topic))
        // Questions
        .route(
            "/topics/{topic_id}/questions/",
            post(routes::create_question),
        )
        .route("/questions/{question_id}", delete(routes::delete_question))
        // Pages
        .route("/add", get(routes::editor_page))
        .route("/", get(routes::public_page))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(middleware)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
