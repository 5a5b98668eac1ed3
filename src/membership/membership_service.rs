use super::membership_dto::{InviteWorkerRequest, UpdateWorkerRequest};
use super::membership_models::{
    resolve_role, InvitationWithCompany, Role, Worker, WorkerStatus, WorkerWithUser,
};
use super::membership_repository::WorkerRepository;
use crate::company::company_repository::CompanyRepository;
use crate::error::{AppError, Result};
use crate::user::user_repository::UserRepository;
use uuid::Uuid;

/// Resolves what a user may do within a company, and manages the worker
/// membership lifecycle (invite, accept, decline, flag changes).
#[derive(Clone)]
pub struct MembershipService {
    companies: CompanyRepository,
    workers: WorkerRepository,
    users: UserRepository,
}

impl MembershipService {
    pub fn new(
        companies: CompanyRepository,
        workers: WorkerRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            companies,
            workers,
            users,
        }
    }

    /// Resolves the caller's role from the current Company/Worker state.
    /// Evaluated fresh on every authorization check; capability flags can
    /// change between requests, so the result is never cached.
    pub async fn resolve(&self, user_id: Uuid, company_id: Uuid) -> Result<Option<Role>> {
        let Some(company) = self.companies.find_by_id(company_id).await? else {
            return Ok(None);
        };

        let worker = self
            .workers
            .find_by_user_and_company(user_id, company_id)
            .await?;

        Ok(resolve_role(&company, worker.as_ref(), user_id))
    }

    /// Role of the caller, or NotFound. Absence and invisibility are
    /// deliberately indistinguishable to the caller.
    pub async fn require_access(&self, user_id: Uuid, company_id: Uuid) -> Result<Role> {
        self.resolve(user_id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
    }

    pub async fn require_edit(&self, user_id: Uuid, company_id: Uuid) -> Result<Role> {
        let role = self.require_access(user_id, company_id).await?;

        if !role.can_edit() {
            return Err(AppError::Forbidden(
                "You do not have permission to edit this company".to_string(),
            ));
        }

        Ok(role)
    }

    pub async fn invite_worker(
        &self,
        actor_id: Uuid,
        company_id: Uuid,
        payload: InviteWorkerRequest,
    ) -> Result<Worker> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        // Only the owner may invite; everyone else sees the same 404 as a
        // stranger would.
        if company.created_by_id != actor_id {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        let user = self
            .users
            .find_by_email(&payload.email)
            .await?
            .ok_or_else(|| AppError::NotFound("No account found for this email".to_string()))?;

        if user.id == company.created_by_id {
            return Err(AppError::BadRequest(
                "User is already a member of this company".to_string(),
            ));
        }

        if self
            .workers
            .find_by_user_and_company(user.id, company_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "User is already a member of this company".to_string(),
            ));
        }

        self.workers
            .create(
                user.id,
                company_id,
                payload.can_edit,
                payload.can_view,
                payload.can_manage_finance,
            )
            .await
    }

    pub async fn list_workers(
        &self,
        actor_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<WorkerWithUser>> {
        self.require_access(actor_id, company_id).await?;
        self.workers.find_all_by_company(company_id).await
    }

    pub async fn list_invitations(&self, actor_id: Uuid) -> Result<Vec<InvitationWithCompany>> {
        self.workers.find_invitations_for_user(actor_id).await
    }

    pub async fn accept_invitation(&self, actor_id: Uuid, worker_id: Uuid) -> Result<Worker> {
        let worker = self.pending_invitation(actor_id, worker_id).await?;
        self.workers.accept(worker.id).await
    }

    pub async fn decline_invitation(&self, actor_id: Uuid, worker_id: Uuid) -> Result<()> {
        let worker = self.pending_invitation(actor_id, worker_id).await?;
        self.workers.delete(worker.id).await?;
        Ok(())
    }

    async fn pending_invitation(&self, actor_id: Uuid, worker_id: Uuid) -> Result<Worker> {
        let worker = self
            .workers
            .find_by_id(worker_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invitation not found".to_string()))?;

        if worker.user_id != actor_id {
            return Err(AppError::NotFound("Invitation not found".to_string()));
        }

        if worker.status != WorkerStatus::Invited {
            return Err(AppError::BadRequest(
                "Invitation is no longer pending".to_string(),
            ));
        }

        Ok(worker)
    }

    pub async fn update_worker(
        &self,
        actor_id: Uuid,
        company_id: Uuid,
        worker_id: Uuid,
        payload: UpdateWorkerRequest,
    ) -> Result<Worker> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        if company.created_by_id != actor_id {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        let worker = self
            .workers
            .find_by_id(worker_id)
            .await?
            .filter(|w| w.company_id == company_id)
            .ok_or_else(|| AppError::NotFound("Worker not found".to_string()))?;

        let status = payload
            .status
            .as_deref()
            .map(|s| {
                s.parse::<WorkerStatus>()
                    .map_err(AppError::Validation)
                    .and_then(|parsed| {
                        if parsed == WorkerStatus::Invited {
                            Err(AppError::Validation(
                                "Worker status cannot be set back to INVITED".to_string(),
                            ))
                        } else {
                            Ok(parsed)
                        }
                    })
            })
            .transpose()?;

        self.workers
            .update(
                worker.id,
                payload.can_edit,
                payload.can_view,
                payload.can_manage_finance,
                status,
            )
            .await
    }
}
