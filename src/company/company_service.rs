use super::company_dto::{CreateCompanyRequest, UpdateCompanyRequest};
use super::company_models::{Company, CompanyResponse};
use super::company_repository::CompanyRepository;
use crate::error::{on_unique_violation, AppError, Result};
use crate::membership::membership_models::{Capabilities, Role};
use crate::membership::membership_service::MembershipService;
use uuid::Uuid;

#[derive(Clone)]
pub struct CompanyService {
    repo: CompanyRepository,
    membership: MembershipService,
}

impl CompanyService {
    pub fn new(repo: CompanyRepository, membership: MembershipService) -> Self {
        Self { repo, membership }
    }

    pub async fn create_company(
        &self,
        actor_id: Uuid,
        payload: CreateCompanyRequest,
    ) -> Result<CompanyResponse> {
        if let Some(ref tax_id) = payload.tax_id {
            if self.repo.tax_id_in_use(tax_id, None).await? {
                return Err(AppError::BadRequest("Tax ID is already in use".to_string()));
            }
        }

        let company = self
            .repo
            .create(
                &payload.name,
                payload.tax_id.as_deref(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.address.as_deref(),
                actor_id,
            )
            .await
            .map_err(|e| on_unique_violation(e, "Tax ID is already in use"))?;

        Ok(annotate(company, Role::Owner))
    }

    pub async fn list_companies(&self, actor_id: Uuid) -> Result<Vec<CompanyResponse>> {
        let mut companies: Vec<CompanyResponse> = self
            .repo
            .find_owned_by(actor_id)
            .await?
            .into_iter()
            .map(|c| annotate(c, Role::Owner))
            .collect();

        for row in self.repo.find_member_companies(actor_id).await? {
            let (company, capabilities) = row.into_parts();
            companies.push(annotate(company, Role::Member(capabilities)));
        }

        Ok(companies)
    }

    pub async fn get_company(&self, actor_id: Uuid, company_id: Uuid) -> Result<CompanyResponse> {
        let company = self
            .repo
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        let role = self.membership.require_access(actor_id, company_id).await?;

        Ok(annotate(company, role))
    }

    pub async fn update_company(
        &self,
        actor_id: Uuid,
        company_id: Uuid,
        payload: UpdateCompanyRequest,
    ) -> Result<CompanyResponse> {
        let role = self.membership.require_edit(actor_id, company_id).await?;

        if let Some(ref tax_id) = payload.tax_id {
            if self.repo.tax_id_in_use(tax_id, Some(company_id)).await? {
                return Err(AppError::BadRequest("Tax ID is already in use".to_string()));
            }
        }

        let company = self
            .repo
            .update(
                company_id,
                payload.name.as_deref(),
                payload.tax_id.as_deref(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.address.as_deref(),
            )
            .await
            .map_err(|e| on_unique_violation(e, "Tax ID is already in use"))?;

        Ok(annotate(company, role))
    }

    pub async fn delete_company(&self, actor_id: Uuid, company_id: Uuid) -> Result<()> {
        let company = self
            .repo
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        // Owner only. Non-owners get the same 404 as non-members.
        if company.created_by_id != actor_id {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        self.repo.delete(company_id).await?;

        Ok(())
    }
}

fn annotate(company: Company, role: Role) -> CompanyResponse {
    let permissions: Capabilities = role.capabilities();
    CompanyResponse {
        company,
        user_role: role.as_str().to_string(),
        permissions,
    }
}
