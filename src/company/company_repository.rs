use super::company_models::{Company, MemberCompanyRow};
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        tax_id: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        created_by_id: Uuid,
    ) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, tax_id, email, phone, address, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(name)
        .bind(tax_id)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(created_by_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn find_owned_by(&self, user_id: Uuid) -> Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE created_by_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Companies the user belongs to through an ACTIVE worker row, with
    /// the membership flags alongside. Companies the user owns are
    /// excluded; ownership is resolved separately and always wins.
    pub async fn find_member_companies(&self, user_id: Uuid) -> Result<Vec<MemberCompanyRow>> {
        let companies = sqlx::query_as::<_, MemberCompanyRow>(
            "SELECT c.*, w.can_edit, w.can_view, w.can_manage_finance
             FROM companies c
             JOIN workers w ON w.company_id = c.id
             WHERE w.user_id = $1 AND w.status = 'ACTIVE' AND c.created_by_id <> $1
             ORDER BY c.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        tax_id: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            "UPDATE companies SET
                name = COALESCE($1, name),
                tax_id = COALESCE($2, tax_id),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                updated_at = NOW()
             WHERE id = $6
             RETURNING *",
        )
        .bind(name)
        .bind(tax_id)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn tax_id_in_use(&self, tax_id: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM companies WHERE tax_id = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(tax_id)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(existing.is_some())
    }
}
