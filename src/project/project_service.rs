use super::project_dto::{CreateProjectRequest, UpdateProjectRequest};
use super::project_models::{Project, ProjectPriority, ProjectResponse, ProjectStatus};
use super::project_repository::{DeleteOutcome, ProjectRepository};
use crate::company::company_repository::CompanyRepository;
use crate::error::{AppError, Result};
use crate::membership::membership_models::Role;
use crate::membership::membership_service::MembershipService;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
    companies: CompanyRepository,
    membership: MembershipService,
}

impl ProjectService {
    pub fn new(
        repo: ProjectRepository,
        companies: CompanyRepository,
        membership: MembershipService,
    ) -> Self {
        Self {
            repo,
            companies,
            membership,
        }
    }

    pub async fn create_project(
        &self,
        actor_id: Uuid,
        payload: CreateProjectRequest,
    ) -> Result<ProjectResponse> {
        self.companies
            .find_by_id(payload.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        let role = self.membership.resolve(actor_id, payload.company_id).await?;
        if !role.is_some_and(|r| r.can_edit()) {
            return Err(AppError::Forbidden(
                "You do not have permission to create projects in this company".to_string(),
            ));
        }

        let priority = parse_priority(payload.priority.as_deref())?.unwrap_or(ProjectPriority::Medium);

        let project = self
            .repo
            .create(
                payload.company_id,
                &payload.name,
                payload.description.as_deref(),
                priority,
                payload.start_date,
                payload.end_date,
                payload.budget,
                payload.client_name.as_deref(),
                actor_id,
            )
            .await?;

        self.with_stats(project).await
    }

    pub async fn list_projects(
        &self,
        actor_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<ProjectResponse>> {
        self.membership.require_access(actor_id, company_id).await?;

        let projects = self.repo.find_all_by_company(company_id).await?;

        let mut responses = Vec::with_capacity(projects.len());
        for project in projects {
            responses.push(self.with_stats(project).await?);
        }

        Ok(responses)
    }

    pub async fn get_project(&self, actor_id: Uuid, project_id: Uuid) -> Result<ProjectResponse> {
        let (project, _) = self.visible_project(actor_id, project_id).await?;
        self.with_stats(project).await
    }

    pub async fn update_project(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        payload: UpdateProjectRequest,
    ) -> Result<ProjectResponse> {
        let (project, role) = self.visible_project(actor_id, project_id).await?;

        if !role.can_edit() {
            return Err(AppError::Forbidden(
                "You do not have permission to edit this project".to_string(),
            ));
        }

        // Any status is accepted here; project statuses carry no
        // transition graph.
        let status = payload
            .status
            .as_deref()
            .map(|s| s.parse::<ProjectStatus>().map_err(AppError::Validation))
            .transpose()?;
        let priority = parse_priority(payload.priority.as_deref())?;

        let updated = self
            .repo
            .update(
                project.id,
                payload.name.as_deref(),
                payload.description.as_deref(),
                status,
                priority,
                payload.start_date,
                payload.end_date,
                payload.budget,
                payload.client_name.as_deref(),
            )
            .await?;

        self.with_stats(updated).await
    }

    /// Deletion is stricter than editing: only the company owner or the
    /// project's creator may delete, and only while the project owns no
    /// tasks. The emptiness check runs inside the repository transaction.
    pub async fn delete_project(&self, actor_id: Uuid, project_id: Uuid) -> Result<()> {
        let (project, role) = self.visible_project(actor_id, project_id).await?;

        if !role.is_owner() && project.created_by_id != actor_id {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this project".to_string(),
            ));
        }

        match self.repo.delete_if_empty(project.id).await? {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::HasTasks => Err(AppError::BadRequest(
                "Project contains tasks and cannot be deleted".to_string(),
            )),
            DeleteOutcome::NotFound => Err(AppError::NotFound("Project not found".to_string())),
        }
    }

    /// Fetches a project the caller can see, or NotFound. A caller with
    /// no standing in the owning company cannot learn the project exists.
    async fn visible_project(&self, actor_id: Uuid, project_id: Uuid) -> Result<(Project, Role)> {
        let project = self
            .repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let role = self
            .membership
            .resolve(actor_id, project.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        Ok((project, role))
    }

    async fn with_stats(&self, project: Project) -> Result<ProjectResponse> {
        let stats = self.repo.task_stats(project.id).await?;
        Ok(ProjectResponse { project, stats })
    }
}

fn parse_priority(raw: Option<&str>) -> Result<Option<ProjectPriority>> {
    raw.map(|p| p.parse::<ProjectPriority>().map_err(AppError::Validation))
        .transpose()
}
