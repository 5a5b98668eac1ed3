use super::membership_models::{InvitationWithCompany, Worker, WorkerStatus, WorkerWithUser};
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct WorkerRepository {
    pool: PgPool,
}

impl WorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>> {
        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(worker)
    }

    pub async fn find_by_user_and_company(
        &self,
        user_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<Worker>> {
        let worker = sqlx::query_as::<_, Worker>(
            "SELECT * FROM workers WHERE user_id = $1 AND company_id = $2",
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn find_all_by_company(&self, company_id: Uuid) -> Result<Vec<WorkerWithUser>> {
        let workers = sqlx::query_as::<_, WorkerWithUser>(
            "SELECT w.*, u.username, u.email FROM workers w
             JOIN users u ON u.id = w.user_id
             WHERE w.company_id = $1
             ORDER BY w.invited_at ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workers)
    }

    pub async fn find_invitations_for_user(&self, user_id: Uuid) -> Result<Vec<InvitationWithCompany>> {
        let invitations = sqlx::query_as::<_, InvitationWithCompany>(
            "SELECT w.*, c.name AS company_name FROM workers w
             JOIN companies c ON c.id = w.company_id
             WHERE w.user_id = $1 AND w.status = 'INVITED'
             ORDER BY w.invited_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invitations)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        can_edit: bool,
        can_view: bool,
        can_manage_finance: bool,
    ) -> Result<Worker> {
        let worker = sqlx::query_as::<_, Worker>(
            "INSERT INTO workers (user_id, company_id, status, can_edit, can_view, can_manage_finance)
             VALUES ($1, $2, 'INVITED', $3, $4, $5)
             RETURNING *",
        )
        .bind(user_id)
        .bind(company_id)
        .bind(can_edit)
        .bind(can_view)
        .bind(can_manage_finance)
        .fetch_one(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn accept(&self, id: Uuid) -> Result<Worker> {
        let worker = sqlx::query_as::<_, Worker>(
            "UPDATE workers SET status = 'ACTIVE', joined_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn update(
        &self,
        id: Uuid,
        can_edit: Option<bool>,
        can_view: Option<bool>,
        can_manage_finance: Option<bool>,
        status: Option<WorkerStatus>,
    ) -> Result<Worker> {
        let worker = sqlx::query_as::<_, Worker>(
            "UPDATE workers SET
                can_edit = COALESCE($1, can_edit),
                can_view = COALESCE($2, can_view),
                can_manage_finance = COALESCE($3, can_manage_finance),
                status = COALESCE($4, status),
                joined_at = CASE WHEN $4 = 'ACTIVE' AND joined_at IS NULL THEN NOW() ELSE joined_at END,
                left_at = CASE WHEN $4 = 'LEFT' THEN NOW() ELSE left_at END
             WHERE id = $5
             RETURNING *",
        )
        .bind(can_edit)
        .bind(can_view)
        .bind(can_manage_finance)
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(worker)
    }

    /// User ids of everyone currently acting for the company: the owner
    /// plus all ACTIVE workers.
    pub async fn find_active_member_ids(&self, company_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM workers WHERE company_id = $1 AND status = 'ACTIVE'
             UNION
             SELECT created_by_id FROM companies WHERE id = $1",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
