//! MCP Server implementation for todo management
//!
//! Exposes the five task tools over rmcp. The tool router supplies the
//! advertised schemas; every call, over stdio or in-process through
//! [`EmbeddableMcp`], goes through the name-based dispatcher so malformed
//! calls come back as error envelopes instead of protocol errors.

use mcp_common::{async_trait, EmbeddableMcp, EmbeddableResult};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer,
};
use serde_json::Value;

use crate::db::Database;
use crate::handlers;
use crate::params::*;
use crate::repository::TaskRepository;

/// The main Todo MCP Server
#[derive(Clone)]
pub struct TodoMcpServer {
    repository: TaskRepository,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to the dispatcher
// ============================================================================

#[tool_router]
impl TodoMcpServer {
    pub fn new(db: Database) -> Self {
        Self {
            repository: TaskRepository::new(db),
            tool_router: Self::tool_router(),
        }
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.repository
    }

    #[tool(description = "Creates a new task for a user")]
    async fn add_task(
        &self,
        Parameters(params): Parameters<AddTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolCall::AddTask(params)))
    }

    #[tool(description = "Lists tasks for a user")]
    async fn list_tasks(
        &self,
        Parameters(params): Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolCall::ListTasks(params)))
    }

    #[tool(description = "Marks a task as completed")]
    async fn complete_task(
        &self,
        Parameters(params): Parameters<CompleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolCall::CompleteTask(params)))
    }

    #[tool(description = "Deletes a task")]
    async fn delete_task(
        &self,
        Parameters(params): Parameters<DeleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolCall::DeleteTask(params)))
    }

    #[tool(description = "Updates task details")]
    async fn update_task(
        &self,
        Parameters(params): Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolCall::UpdateTask(params)))
    }
}

impl TodoMcpServer {
    fn run(&self, call: ToolCall) -> CallToolResult {
        handlers::execute(&self.repository, call).into_call_tool_result()
    }

    fn dispatch(&self, name: &str, arguments: Value) -> CallToolResult {
        handlers::dispatch(&self.repository, name, arguments).into_call_tool_result()
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl rmcp::ServerHandler for TodoMcpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tool_router.list_all()))
    }

    // Not routed through `tool_router.call`: an unknown name or bad arguments
    // must produce an `is_error` result, not `invalid_params`.
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        Ok(self.dispatch(&request.name, arguments))
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Todo MCP server. Every tool takes the owning user_id; tasks of other users \
                 are reported as not found."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for TodoMcpServer {
    fn server_name(&self) -> &str {
        "todo"
    }

    fn server_description(&self) -> Option<&str> {
        Some("Per-user todo list: add, list, complete, update and delete tasks.")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        Ok(self.dispatch(name, params))
    }
}
