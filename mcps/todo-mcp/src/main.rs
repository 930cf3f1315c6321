//! Todo MCP - per-user task management over stdio

use anyhow::Result;
use clap::{ArgAction, Parser};
use rmcp::{transport::io::stdio, ServiceExt};
use todo_mcp::{Database, TodoMcpServer};

#[derive(Parser)]
#[command(name = "todo-mcp")]
#[command(about = "Todo list tools served over MCP stdio")]
struct Cli {
    /// Storage connection string (sqlite://path or sqlite::memory:)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://todo.db")]
    database_url: String,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mcp_common::init_tracing(&["todo_mcp"], cli.verbose)?;

    tracing::info!("Starting Todo MCP server");

    let db = Database::connect(&cli.database_url)?;
    let server = TodoMcpServer::new(db);
    let service = server.serve(stdio()).await?;

    tracing::info!("Todo MCP server running");

    service.waiting().await?;

    tracing::info!("Todo MCP server stopped");

    Ok(())
}
