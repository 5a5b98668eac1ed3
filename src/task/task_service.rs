use super::task_dto::{CreateTaskRequest, TaskFilters, UpdateTaskRequest, UpdateTaskStatusRequest};
use super::task_models::{Task, TaskPriority, TaskStatus};
use super::task_repository::TaskRepository;
use crate::error::{AppError, Result};
use crate::membership::membership_models::Role;
use crate::membership::membership_service::MembershipService;
use crate::notification::notification_service::{assignment_should_notify, NotificationService};
use crate::project::project_models::Project;
use crate::project::project_repository::ProjectRepository;
use uuid::Uuid;

/// Who may change a task. Wider than the company-level edit flag: the
/// task's creator and its current assignee may always update it, which
/// lets an assignee move status and log hours without general edit
/// rights.
pub fn can_modify_task(role: &Role, task: &Task, user_id: Uuid) -> bool {
    match role {
        Role::Owner => true,
        Role::Member(caps) => {
            caps.can_edit || task.created_by_id == user_id || task.assigned_to_id == Some(user_id)
        }
    }
}

/// Who may delete a task. Narrower than `can_modify_task`: being the
/// current assignee is not sufficient. Kept as its own predicate so a
/// change to the edit rule cannot widen deletion.
pub fn can_delete_task(role: &Role, task: &Task, user_id: Uuid) -> bool {
    match role {
        Role::Owner => true,
        Role::Member(caps) => caps.can_edit || task.created_by_id == user_id,
    }
}

#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    projects: ProjectRepository,
    membership: MembershipService,
    notifications: NotificationService,
}

impl TaskService {
    pub fn new(
        repo: TaskRepository,
        projects: ProjectRepository,
        membership: MembershipService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            projects,
            membership,
            notifications,
        }
    }

    pub async fn create_task(&self, actor_id: Uuid, payload: CreateTaskRequest) -> Result<Task> {
        let project = self
            .projects
            .find_by_id(payload.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let role = self
            .membership
            .resolve(actor_id, project.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if !role.can_edit() {
            return Err(AppError::Forbidden(
                "You do not have permission to create tasks in this project".to_string(),
            ));
        }

        let priority = payload
            .priority
            .as_deref()
            .map(|p| p.parse::<TaskPriority>().map_err(AppError::Validation))
            .transpose()?
            .unwrap_or(TaskPriority::Medium);

        let assigned_to_id = match payload.assigned_to_id.as_deref() {
            Some(raw) => {
                let target = resolve_assignee_param(raw, actor_id)?;
                self.ensure_assignable(target, project.company_id).await?;
                Some(target)
            }
            None => None,
        };

        let task = self
            .repo
            .create(
                project.id,
                &payload.title,
                payload.description.as_deref(),
                priority,
                assigned_to_id,
                actor_id,
                payload.estimated_hours,
                payload.due_date,
            )
            .await?;

        if let Some(assignee) = assignment_should_notify(task.assigned_to_id, None, actor_id) {
            self.notifications
                .notify_task_assigned(&task, &project, actor_id, assignee);
        }

        Ok(task)
    }

    pub async fn list_tasks(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        filters: TaskFilters,
    ) -> Result<Vec<Task>> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        self.membership
            .resolve(actor_id, project.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let status = filters
            .status
            .as_deref()
            .map(|s| s.parse::<TaskStatus>().map_err(AppError::Validation))
            .transpose()?;
        let priority = filters
            .priority
            .as_deref()
            .map(|p| p.parse::<TaskPriority>().map_err(AppError::Validation))
            .transpose()?;

        self.repo
            .find_all_by_project(project_id, status, priority, filters.assigned_to_id)
            .await
    }

    pub async fn get_task(&self, actor_id: Uuid, task_id: Uuid) -> Result<Task> {
        let (task, _, _) = self.visible_task(actor_id, task_id).await?;
        Ok(task)
    }

    pub async fn update_task(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        payload: UpdateTaskRequest,
    ) -> Result<Task> {
        let (task, project, role) = self.visible_task(actor_id, task_id).await?;

        if !can_modify_task(&role, &task, actor_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to update this task".to_string(),
            ));
        }

        let status = payload
            .status
            .as_deref()
            .map(|s| s.parse::<TaskStatus>().map_err(AppError::Validation))
            .transpose()?;
        let priority = payload
            .priority
            .as_deref()
            .map(|p| p.parse::<TaskPriority>().map_err(AppError::Validation))
            .transpose()?;

        let assigned_to_id = match payload.assigned_to_id.as_deref() {
            Some(raw) => {
                let target = resolve_assignee_param(raw, actor_id)?;
                self.ensure_assignable(target, project.company_id).await?;
                Some(target)
            }
            None => None,
        };

        let updated = self
            .repo
            .update(
                task.id,
                payload.title.as_deref(),
                payload.description.as_deref(),
                status,
                priority,
                assigned_to_id,
                payload.estimated_hours,
                payload.actual_hours,
                payload.due_date,
            )
            .await?;

        self.dispatch_lifecycle_events(&task, &updated, &project, actor_id);

        Ok(updated)
    }

    pub async fn update_status(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        payload: UpdateTaskStatusRequest,
    ) -> Result<Task> {
        let (task, project, role) = self.visible_task(actor_id, task_id).await?;

        if !can_modify_task(&role, &task, actor_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to update this task".to_string(),
            ));
        }

        let status = payload
            .status
            .parse::<TaskStatus>()
            .map_err(AppError::Validation)?;

        let updated = self.repo.update_status(task.id, status).await?;

        self.dispatch_lifecycle_events(&task, &updated, &project, actor_id);

        Ok(updated)
    }

    pub async fn delete_task(&self, actor_id: Uuid, task_id: Uuid) -> Result<()> {
        let (task, _, role) = self.visible_task(actor_id, task_id).await?;

        if !can_delete_task(&role, &task, actor_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this task".to_string(),
            ));
        }

        self.repo.delete(task.id).await?;

        Ok(())
    }

    /// Compares the task before and after a mutation and fires the
    /// notifications the change warrants. The mutation has already been
    /// persisted; dispatch is fire-and-forget.
    fn dispatch_lifecycle_events(&self, before: &Task, after: &Task, project: &Project, actor_id: Uuid) {
        if let Some(assignee) =
            assignment_should_notify(after.assigned_to_id, before.assigned_to_id, actor_id)
        {
            self.notifications
                .notify_task_assigned(after, project, actor_id, assignee);
        }

        if after.status == TaskStatus::Done && before.status != TaskStatus::Done {
            self.notifications
                .notify_task_completed(after, project, actor_id);
        }
    }

    /// Fetches a task the caller can see along with its project and the
    /// caller's role. No standing in the owning company means NotFound,
    /// never Forbidden.
    async fn visible_task(&self, actor_id: Uuid, task_id: Uuid) -> Result<(Task, Project, Role)> {
        let task = self
            .repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        let project = self
            .projects
            .find_by_id(task.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        let role = self
            .membership
            .resolve(actor_id, project.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        Ok((task, project, role))
    }

    /// The assignment target must be the company owner or an ACTIVE
    /// worker of the task's company.
    async fn ensure_assignable(&self, target_id: Uuid, company_id: Uuid) -> Result<()> {
        if self.membership.resolve(target_id, company_id).await?.is_none() {
            return Err(AppError::Validation(
                "Assignee must be the company owner or an active worker of the company".to_string(),
            ));
        }
        Ok(())
    }
}

fn resolve_assignee_param(raw: &str, actor_id: Uuid) -> Result<Uuid> {
    if raw == "me" {
        return Ok(actor_id);
    }

    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid assignee id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::membership_models::Capabilities;
    use chrono::Utc;

    fn task(created_by: Uuid, assigned_to: Option<Uuid>) -> Task {
        Task {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "Pour foundation".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assigned_to_id: assigned_to,
            created_by_id: created_by,
            estimated_hours: None,
            actual_hours: None,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn member(can_edit: bool) -> Role {
        Role::Member(Capabilities {
            can_edit,
            can_view: true,
            can_manage_finance: false,
        })
    }

    #[test]
    fn owner_may_modify_and_delete_any_task() {
        let t = task(Uuid::new_v4(), None);
        let user = Uuid::new_v4();

        assert!(can_modify_task(&Role::Owner, &t, user));
        assert!(can_delete_task(&Role::Owner, &t, user));
    }

    #[test]
    fn edit_flag_grants_modify_and_delete() {
        let t = task(Uuid::new_v4(), None);
        let user = Uuid::new_v4();

        assert!(can_modify_task(&member(true), &t, user));
        assert!(can_delete_task(&member(true), &t, user));
    }

    #[test]
    fn creator_may_modify_and_delete_without_edit_flag() {
        let user = Uuid::new_v4();
        let t = task(user, None);

        assert!(can_modify_task(&member(false), &t, user));
        assert!(can_delete_task(&member(false), &t, user));
    }

    #[test]
    fn assignee_may_modify_but_not_delete() {
        let user = Uuid::new_v4();
        let t = task(Uuid::new_v4(), Some(user));

        assert!(can_modify_task(&member(false), &t, user));
        assert!(!can_delete_task(&member(false), &t, user));
    }

    #[test]
    fn unrelated_member_without_edit_flag_may_do_neither() {
        let t = task(Uuid::new_v4(), Some(Uuid::new_v4()));
        let user = Uuid::new_v4();

        assert!(!can_modify_task(&member(false), &t, user));
        assert!(!can_delete_task(&member(false), &t, user));
    }

    #[test]
    fn me_sentinel_resolves_to_the_actor() {
        let actor = Uuid::new_v4();
        assert_eq!(resolve_assignee_param("me", actor).unwrap(), actor);

        let other = Uuid::new_v4();
        assert_eq!(
            resolve_assignee_param(&other.to_string(), actor).unwrap(),
            other
        );

        assert!(resolve_assignee_param("someone", actor).is_err());
    }
}
