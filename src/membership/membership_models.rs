use crate::company::company_models::Company;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerStatus {
    Invited,
    Active,
    Inactive,
    Left,
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerStatus::Invited => write!(f, "INVITED"),
            WorkerStatus::Active => write!(f, "ACTIVE"),
            WorkerStatus::Inactive => write!(f, "INACTIVE"),
            WorkerStatus::Left => write!(f, "LEFT"),
        }
    }
}

impl FromStr for WorkerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INVITED" => Ok(WorkerStatus::Invited),
            "ACTIVE" => Ok(WorkerStatus::Active),
            "INACTIVE" => Ok(WorkerStatus::Inactive),
            "LEFT" => Ok(WorkerStatus::Left),
            other => Err(format!("Invalid worker status: {}", other)),
        }
    }
}

/// A user's membership record in a company: status plus the three
/// independent capability flags.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Worker {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub status: WorkerStatus,
    pub can_edit: bool,
    pub can_view: bool,
    pub can_manage_finance: bool,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
}

/// Worker row joined with the member's account for listing.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WorkerWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub status: WorkerStatus,
    pub can_edit: bool,
    pub can_view: bool,
    pub can_manage_finance: bool,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
    pub username: String,
    pub email: String,
}

/// Pending invitation joined with the inviting company's name.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InvitationWithCompany {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub status: WorkerStatus,
    pub can_edit: bool,
    pub can_view: bool,
    pub can_manage_finance: bool,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
    pub company_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Capabilities {
    pub can_edit: bool,
    pub can_view: bool,
    pub can_manage_finance: bool,
}

impl Capabilities {
    pub fn full() -> Self {
        Self {
            can_edit: true,
            can_view: true,
            can_manage_finance: true,
        }
    }
}

/// The resolved standing of a user within a company. The company creator
/// is `Owner` with full capability no matter what Worker rows exist;
/// everyone else acts through the flags on their ACTIVE membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Member(Capabilities),
}

impl Role {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Role::Owner => Capabilities::full(),
            Role::Member(caps) => *caps,
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }

    pub fn can_edit(&self) -> bool {
        self.capabilities().can_edit
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Member(_) => "WORKER",
        }
    }
}

/// Resolves a user's role against a snapshot of the company and their
/// membership row, if any. Only an ACTIVE row grants capabilities;
/// INVITED, INACTIVE and LEFT rows grant nothing.
pub fn resolve_role(company: &Company, worker: Option<&Worker>, user_id: Uuid) -> Option<Role> {
    if company.created_by_id == user_id {
        return Some(Role::Owner);
    }

    match worker {
        Some(w) if w.status == WorkerStatus::Active => Some(Role::Member(Capabilities {
            can_edit: w.can_edit,
            can_view: w.can_view,
            can_manage_finance: w.can_manage_finance,
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn company(owner: Uuid) -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "Acme Construction".to_string(),
            tax_id: None,
            email: None,
            phone: None,
            address: None,
            created_by_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn worker(user_id: Uuid, company_id: Uuid, status: WorkerStatus, can_edit: bool) -> Worker {
        Worker {
            id: Uuid::new_v4(),
            user_id,
            company_id,
            status,
            can_edit,
            can_view: true,
            can_manage_finance: false,
            invited_at: Utc::now(),
            joined_at: None,
            left_at: None,
        }
    }

    #[test]
    fn owner_gets_full_capabilities_without_a_worker_row() {
        let owner = Uuid::new_v4();
        let c = company(owner);

        let role = resolve_role(&c, None, owner).unwrap();
        assert!(role.is_owner());
        assert_eq!(role.capabilities(), Capabilities::full());
    }

    #[test]
    fn owner_wins_even_when_a_restrictive_worker_row_exists() {
        let owner = Uuid::new_v4();
        let c = company(owner);
        let w = worker(owner, c.id, WorkerStatus::Active, false);

        let role = resolve_role(&c, Some(&w), owner).unwrap();
        assert!(role.is_owner());
        assert!(role.can_edit());
    }

    #[test]
    fn active_worker_gets_flags_verbatim() {
        let user = Uuid::new_v4();
        let c = company(Uuid::new_v4());
        let w = worker(user, c.id, WorkerStatus::Active, true);

        let role = resolve_role(&c, Some(&w), user).unwrap();
        assert!(!role.is_owner());
        assert!(role.can_edit());
        assert!(!role.capabilities().can_manage_finance);
    }

    #[test]
    fn non_active_statuses_grant_no_access() {
        let user = Uuid::new_v4();
        let c = company(Uuid::new_v4());

        for status in [WorkerStatus::Invited, WorkerStatus::Inactive, WorkerStatus::Left] {
            let w = worker(user, c.id, status, true);
            assert!(resolve_role(&c, Some(&w), user).is_none());
        }
    }

    #[test]
    fn no_worker_row_means_no_access() {
        let c = company(Uuid::new_v4());
        assert!(resolve_role(&c, None, Uuid::new_v4()).is_none());
    }

    #[test]
    fn worker_status_round_trips() {
        for status in [
            WorkerStatus::Invited,
            WorkerStatus::Active,
            WorkerStatus::Inactive,
            WorkerStatus::Left,
        ] {
            assert_eq!(status.to_string().parse::<WorkerStatus>().unwrap(), status);
        }
        assert!("FIRED".parse::<WorkerStatus>().is_err());
    }
}
