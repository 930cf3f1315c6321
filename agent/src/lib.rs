//! Todo chat agent
//!
//! Routes natural-language chat messages to the todo tools and exposes the
//! task store over HTTP.

pub mod chat;
pub mod config;
pub mod db;
pub mod intent;
pub mod llm;
pub mod web;

pub use chat::{ChatReply, ChatService};
pub use config::AgentConfig;
pub use intent::{classify, Intent};
