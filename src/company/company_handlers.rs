use super::company_dto::{CreateCompanyRequest, UpdateCompanyRequest};
use super::company_models::CompanyResponse;
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

/// Create a company; the creator becomes its owner
#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Validation error or duplicate tax ID")
    ),
    tag = "companies",
    security(("bearer_auth" = []))
)]
pub async fn create_company(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let company = state.company_service.create_company(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// List companies the caller owns or works for
#[utoipa::path(
    get,
    path = "/api/companies",
    responses(
        (status = 200, description = "Companies with the caller's role", body = Vec<CompanyResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "companies",
    security(("bearer_auth" = []))
)]
pub async fn get_companies(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<CompanyResponse>>> {
    let companies = state.company_service.list_companies(user_id).await?;
    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyResponse>> {
    let company = state.company_service.get_company(user_id, company_id).await?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let company = state
        .company_service
        .update_company(user_id, company_id, payload)
        .await?;

    Ok(Json(company))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .company_service
        .delete_company(user_id, company_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
