use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Project statuses. There is no enforced transition graph: any
/// authorized update may set any status directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "PLANNING"),
            ProjectStatus::Active => write!(f, "ACTIVE"),
            ProjectStatus::OnHold => write!(f, "ON_HOLD"),
            ProjectStatus::Completed => write!(f, "COMPLETED"),
            ProjectStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNING" => Ok(ProjectStatus::Planning),
            "ACTIVE" => Ok(ProjectStatus::Active),
            "ON_HOLD" => Ok(ProjectStatus::OnHold),
            "COMPLETED" => Ok(ProjectStatus::Completed),
            "CANCELLED" => Ok(ProjectStatus::Cancelled),
            other => Err(format!("Invalid project status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for ProjectPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectPriority::Low => write!(f, "LOW"),
            ProjectPriority::Medium => write!(f, "MEDIUM"),
            ProjectPriority::High => write!(f, "HIGH"),
            ProjectPriority::Urgent => write!(f, "URGENT"),
        }
    }
}

impl FromStr for ProjectPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(ProjectPriority::Low),
            "MEDIUM" => Ok(ProjectPriority::Medium),
            "HIGH" => Ok(ProjectPriority::High),
            "URGENT" => Ok(ProjectPriority::Urgent),
            other => Err(format!("Invalid project priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub budget: Option<f64>,
    pub client_name: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task counts for a project, computed from the task table on demand.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectStats {
    pub total_tasks: i64,
    pub todo_tasks: i64,
    pub in_progress_tasks: i64,
    pub review_tasks: i64,
    pub done_tasks: i64,
    pub cancelled_tasks: i64,
    pub completion_rate: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    pub stats: ProjectStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_round_trips() {
        for status in [
            ProjectStatus::Planning,
            ProjectStatus::Active,
            ProjectStatus::OnHold,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<ProjectStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_project_status_is_rejected() {
        assert!("PAUSED".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn project_priority_display() {
        assert_eq!(ProjectPriority::Low.to_string(), "LOW");
        assert_eq!(ProjectPriority::Urgent.to_string(), "URGENT");
    }
}
