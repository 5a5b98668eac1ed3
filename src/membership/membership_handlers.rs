use super::membership_dto::{InviteWorkerRequest, UpdateWorkerRequest};
use super::membership_models::{InvitationWithCompany, Worker, WorkerWithUser};
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

/// Invite a user to a company by email (owner only)
#[utoipa::path(
    post,
    path = "/api/companies/{id}/workers",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    request_body = InviteWorkerRequest,
    responses(
        (status = 201, description = "Worker invited", body = Worker),
        (status = 400, description = "Invalid email or already a member"),
        (status = 404, description = "Company or account not found")
    ),
    tag = "workers",
    security(("bearer_auth" = []))
)]
pub async fn invite_worker(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<InviteWorkerRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let worker = state
        .membership_service
        .invite_worker(user_id, company_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(worker)))
}

/// List a company's workers
pub async fn get_workers(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<WorkerWithUser>>> {
    let workers = state
        .membership_service
        .list_workers(user_id, company_id)
        .await?;

    Ok(Json(workers))
}

/// Update a worker's capability flags or status (owner only)
pub async fn update_worker(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path((company_id, worker_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateWorkerRequest>,
) -> Result<Json<Worker>> {
    let worker = state
        .membership_service
        .update_worker(user_id, company_id, worker_id, payload)
        .await?;

    Ok(Json(worker))
}

/// List the authenticated user's pending invitations
pub async fn get_invitations(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<InvitationWithCompany>>> {
    let invitations = state.membership_service.list_invitations(user_id).await?;
    Ok(Json(invitations))
}

/// Accept a pending invitation
#[utoipa::path(
    post,
    path = "/api/invitations/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Invitation ID")
    ),
    responses(
        (status = 200, description = "Invitation accepted", body = Worker),
        (status = 400, description = "Invitation is no longer pending"),
        (status = 404, description = "Invitation not found")
    ),
    tag = "workers",
    security(("bearer_auth" = []))
)]
pub async fn accept_invitation(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<Worker>> {
    let worker = state
        .membership_service
        .accept_invitation(user_id, invitation_id)
        .await?;

    Ok(Json(worker))
}

/// Decline a pending invitation
pub async fn decline_invitation(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(invitation_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .membership_service
        .decline_invitation(user_id, invitation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
