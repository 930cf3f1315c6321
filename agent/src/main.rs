use anyhow::Result;
use clap::Parser;

use todo_agent::config::AgentConfig;
use todo_agent::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgentConfig::parse();

    mcp_common::init_tracing(&["todo_agent", "todo_mcp", "tower_http"], config.verbose)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting todo-agent"
    );

    web::serve(config).await
}
