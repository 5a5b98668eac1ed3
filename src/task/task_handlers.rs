use super::task_dto::{CreateTaskRequest, TaskFilters, UpdateTaskRequest, UpdateTaskStatusRequest};
use super::task_models::Task;
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

/// Create a task in a project
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation error"),
        (status = 403, description = "No permission to create tasks"),
        (status = 404, description = "Project not found")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task = state.task_service.create_task(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List a project's tasks
#[utoipa::path(
    get,
    path = "/api/projects/{id}/tasks",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("priority" = Option<String>, Query, description = "Filter by priority"),
        ("assigned_to_id" = Option<Uuid>, Query, description = "Filter by assignee")
    ),
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 404, description = "Project not found")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(project_id): Path<Uuid>,
    Query(filters): Query<TaskFilters>,
) -> Result<Json<Vec<Task>>> {
    let tasks = state
        .task_service
        .list_tasks(user_id, project_id, filters)
        .await?;

    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Task>> {
    let task = state.task_service.get_task(user_id, task_id).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task = state
        .task_service
        .update_task(user_id, task_id, payload)
        .await?;

    Ok(Json(task))
}

/// Quick status action; open to the task's assignee as well as editors
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Task),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "No permission to update"),
        (status = 404, description = "Task not found")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn update_task_status(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskStatusRequest>,
) -> Result<Json<Task>> {
    let task = state
        .task_service
        .update_status(user_id, task_id, payload)
        .await?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.task_service.delete_task(user_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
