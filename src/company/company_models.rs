use crate::membership::membership_models::Capabilities;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company row joined with the caller's ACTIVE membership flags.
#[derive(Debug, Clone, FromRow)]
pub struct MemberCompanyRow {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub can_edit: bool,
    pub can_view: bool,
    pub can_manage_finance: bool,
}

impl MemberCompanyRow {
    pub fn into_parts(self) -> (Company, Capabilities) {
        let capabilities = Capabilities {
            can_edit: self.can_edit,
            can_view: self.can_view,
            can_manage_finance: self.can_manage_finance,
        };
        let company = Company {
            id: self.id,
            name: self.name,
            tax_id: self.tax_id,
            email: self.email,
            phone: self.phone,
            address: self.address,
            created_by_id: self.created_by_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (company, capabilities)
    }
}

/// A company annotated with the caller's resolved role and capability
/// flags. Computed per request, never stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyResponse {
    #[serde(flatten)]
    pub company: Company,
    pub user_role: String,
    pub permissions: Capabilities,
}
