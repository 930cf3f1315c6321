//! REST API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use todo_mcp::types::{Patch, StatusFilter, Task, TaskListResponse, TaskPatch, TaskResult};
use todo_mcp::TodoError;

use super::state::AppState;
use crate::chat::ChatReply;
use crate::db::Message;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<T, ApiError>;

/// Map a domain error onto a status code
fn api_error(err: TodoError) -> ApiError {
    let status = match &err {
        TodoError::Validation(_) | TodoError::UnknownTool(_) => StatusCode::BAD_REQUEST,
        TodoError::NotFound { .. } | TodoError::ConversationNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        TodoError::Upstream(_) => {
            tracing::error!("upstream failure: {}", err);
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Unwrap a JSON body, answering malformed ones with an `{error}` body
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("rejected request body: {}", rejection.body_text());
            Err((
                rejection.status(),
                Json(ErrorResponse::new(rejection.body_text())),
            ))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Root banner
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Todo AI Chatbot API is running!".to_string(),
    })
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub conversation_id: Option<i64>,
}

/// Send one chat message
pub async fn chat(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let req = json_body(payload)?;
    state
        .chat
        .handle(&user_id, &req.message, req.conversation_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Conversation history response
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub conversation_id: i64,
    pub messages: Vec<Message>,
}

/// Messages of one conversation, oldest first
pub async fn get_messages(
    State(state): State<AppState>,
    Path((user_id, conversation_id)): Path<(String, i64)>,
) -> ApiResult<Json<MessagesResponse>> {
    let messages = state
        .conversations
        .get_messages(&user_id, conversation_id)
        .map_err(api_error)?;
    Ok(Json(MessagesResponse {
        conversation_id,
        messages,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
}

/// List a user's tasks, optionally filtered by status
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let filter = StatusFilter::parse(query.status.as_deref());
    let tasks = state.tasks.list(&user_id, filter).map_err(api_error)?;
    Ok(Json(TaskListResponse { tasks }))
}

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

/// Create a task
pub async fn create_task(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResult>)> {
    let req = json_body(payload)?;
    let result = state
        .tasks
        .add(&user_id, &req.title, req.description.as_deref())
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Get a single task
pub async fn get_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, i64)>,
) -> ApiResult<Json<Task>> {
    state.tasks.get(&user_id, task_id).map(Json).map_err(api_error)
}

/// Update task request. A `null` description clears it; an absent one keeps it.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "todo_mcp::params::present")]
    pub description: Option<Option<String>>,
}

/// Update a task
pub async fn update_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, i64)>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResult>> {
    let req = json_body(payload)?;
    let patch = TaskPatch {
        title: Patch::from(req.title),
        description: Patch::from(req.description),
    };
    state
        .tasks
        .update(&user_id, task_id, patch)
        .map(Json)
        .map_err(api_error)
}

/// Mark a task completed
pub async fn complete_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, i64)>,
) -> ApiResult<Json<TaskResult>> {
    state.tasks.complete(&user_id, task_id).map(Json).map_err(api_error)
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, i64)>,
) -> ApiResult<Json<TaskResult>> {
    state.tasks.delete(&user_id, task_id).map(Json).map_err(api_error)
}

/// List tools response
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<Value>,
    pub planner: String,
}

/// Tool descriptor table
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: todo_mcp::registry::tool_definitions(),
        planner: state.planner_name().to_string(),
    })
}
