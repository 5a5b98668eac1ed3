use super::project_dto::{CreateProjectRequest, UpdateProjectRequest};
use super::project_models::ProjectResponse;
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

/// Create a project in a company
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 403, description = "No permission to create projects"),
        (status = 404, description = "Company not found")
    ),
    tag = "projects",
    security(("bearer_auth" = []))
)]
pub async fn create_project(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let project = state.project_service.create_project(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// List a company's projects with task stats
pub async fn get_projects(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let projects = state.project_service.list_projects(user_id, company_id).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ProjectResponse>> {
    let project = state.project_service.get_project(user_id, project_id).await?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let project = state
        .project_service
        .update_project(user_id, project_id, payload)
        .await?;

    Ok(Json(project))
}

/// Delete a project (owner or creator, and only while it has no tasks)
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 400, description = "Project contains tasks"),
        (status = 403, description = "No permission to delete"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects",
    security(("bearer_auth" = []))
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(project_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.project_service.delete_project(user_id, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
