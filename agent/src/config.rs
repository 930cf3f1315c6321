//! Command-line and environment configuration

use clap::Parser;
use std::sync::Arc;

use crate::llm::{KeywordPlanner, OpenAiPlanner, ToolPlanner};

/// Todo chat backend
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-agent")]
#[command(about = "Chat backend that turns todo requests into task tool calls")]
pub struct AgentConfig {
    /// Database connection string (sqlite://path, :memory: or a bare path)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://todo.db")]
    pub database_url: String,

    /// API key for the language model. Without it the keyword planner is used
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Model for function calling
    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AgentConfig {
    /// Build the planner this configuration asks for
    pub fn planner(&self) -> Arc<dyn ToolPlanner> {
        match self.openai_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                tracing::info!(model = %self.model, "using OpenAI planner");
                Arc::new(OpenAiPlanner::new(key, &self.model))
            }
            _ => {
                tracing::info!("no API key configured, using keyword planner");
                Arc::new(KeywordPlanner::new())
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
