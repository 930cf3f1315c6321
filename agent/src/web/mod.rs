//! HTTP surface
//!
//! JSON routes for the chat endpoint and direct task access. Every route is
//! scoped by the `user_id` path segment.

pub mod api;
pub mod state;

use anyhow::{Context, Result};
use axum::{
    routing::{get, patch, post},
    Router,
};
use todo_mcp::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AgentConfig;
pub use state::AppState;

/// Start the web server
pub async fn serve(config: AgentConfig) -> Result<()> {
    let db = Database::connect(&config.database_url)
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    tracing::info!("Database opened at {}", config.database_url);

    let state = AppState::new(db, config.planner());
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Starting web server on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat
        .route("/:user_id/chat", post(api::chat))
        .route(
            "/:user_id/conversations/:conversation_id/messages",
            get(api::get_messages),
        )
        // Tasks
        .route(
            "/:user_id/tasks",
            get(api::list_tasks).post(api::create_task),
        )
        .route(
            "/:user_id/tasks/:task_id",
            get(api::get_task)
                .patch(api::update_task)
                .delete(api::delete_task),
        )
        .route("/:user_id/tasks/:task_id/complete", patch(api::complete_task))
        // Tools
        .route("/tools", get(api::list_tools));

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
