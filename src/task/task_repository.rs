use super::task_models::{Task, TaskPriority, TaskStatus};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_project(
        &self,
        project_id: Uuid,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
        assigned_to_id: Option<Uuid>,
    ) -> Result<Vec<Task>> {
        let mut query = "SELECT * FROM tasks WHERE project_id = $1".to_string();
        let mut params_count = 1;

        if status.is_some() {
            params_count += 1;
            query.push_str(&format!(" AND status = ${}", params_count));
        }

        if priority.is_some() {
            params_count += 1;
            query.push_str(&format!(" AND priority = ${}", params_count));
        }

        if assigned_to_id.is_some() {
            params_count += 1;
            query.push_str(&format!(" AND assigned_to_id = ${}", params_count));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut db_query = sqlx::query_as::<_, Task>(&query).bind(project_id);

        if let Some(status) = status {
            db_query = db_query.bind(status);
        }

        if let Some(priority) = priority {
            db_query = db_query.bind(priority);
        }

        if let Some(assigned_to_id) = assigned_to_id {
            db_query = db_query.bind(assigned_to_id);
        }

        let tasks = db_query.fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    pub async fn create(
        &self,
        project_id: Uuid,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
        assigned_to_id: Option<Uuid>,
        created_by_id: Uuid,
        estimated_hours: Option<f64>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (project_id, title, description, priority, assigned_to_id, created_by_id, estimated_hours, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(project_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(assigned_to_id)
        .bind(created_by_id)
        .bind(estimated_hours)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
        assigned_to_id: Option<Uuid>,
        estimated_hours: Option<f64>,
        actual_hours: Option<f64>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                assigned_to_id = COALESCE($5, assigned_to_id),
                estimated_hours = COALESCE($6, estimated_hours),
                actual_hours = COALESCE($7, actual_hours),
                due_date = COALESCE($8, due_date),
                updated_at = NOW()
             WHERE id = $9
             RETURNING *",
        )
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(priority)
        .bind(assigned_to_id)
        .bind(estimated_hours)
        .bind(actual_hours)
        .bind(due_date)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
