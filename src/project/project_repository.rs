use super::project_models::{Project, ProjectPriority, ProjectStats, ProjectStatus};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Outcome of a conditional project deletion.
pub enum DeleteOutcome {
    Deleted,
    HasTasks,
    NotFound,
}

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        name: &str,
        description: Option<&str>,
        priority: ProjectPriority,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        budget: Option<f64>,
        client_name: Option<&str>,
        created_by_id: Uuid,
    ) -> Result<Project> {
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (company_id, name, description, priority, start_date, end_date, budget, client_name, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(company_id)
        .bind(name)
        .bind(description)
        .bind(priority)
        .bind(start_date)
        .bind(end_date)
        .bind(budget)
        .bind(client_name)
        .bind(created_by_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    pub async fn find_all_by_company(&self, company_id: Uuid) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        status: Option<ProjectStatus>,
        priority: Option<ProjectPriority>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        budget: Option<f64>,
        client_name: Option<&str>,
    ) -> Result<Project> {
        let project = sqlx::query_as::<_, Project>(
            "UPDATE projects SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                budget = COALESCE($7, budget),
                client_name = COALESCE($8, client_name),
                updated_at = NOW()
             WHERE id = $9
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(status)
        .bind(priority)
        .bind(start_date)
        .bind(end_date)
        .bind(budget)
        .bind(client_name)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// Deletes the project only if it owns no tasks. The project row is
    /// locked `FOR UPDATE` first: a concurrent task insert needs a
    /// key-share lock on that row for its foreign key, so the count
    /// cannot be invalidated between the check and the delete.
    pub async fn delete_if_empty(&self, id: Uuid) -> Result<DeleteOutcome> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let task_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if task_count > 0 {
            return Ok(DeleteOutcome::HasTasks);
        }

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DeleteOutcome::Deleted)
    }

    pub async fn task_stats(&self, project_id: Uuid) -> Result<ProjectStats> {
        let (total, todo, in_progress, review, done, cancelled) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64)>(
                "SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'TODO'),
                    COUNT(*) FILTER (WHERE status = 'IN_PROGRESS'),
                    COUNT(*) FILTER (WHERE status = 'REVIEW'),
                    COUNT(*) FILTER (WHERE status = 'DONE'),
                    COUNT(*) FILTER (WHERE status = 'CANCELLED')
                 FROM tasks WHERE project_id = $1",
            )
            .bind(project_id)
            .fetch_one(&self.pool)
            .await?;

        let completion_rate = if total > 0 {
            (done as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Ok(ProjectStats {
            total_tasks: total,
            todo_tasks: todo,
            in_progress_tasks: in_progress,
            review_tasks: review,
            done_tasks: done,
            cancelled_tasks: cancelled,
            completion_rate,
        })
    }
}
