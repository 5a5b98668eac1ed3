use super::notification_models::{Notification, TASK_ASSIGNED, TASK_COMPLETED};
use super::notification_repository::NotificationRepository;
use crate::error::Result;
use crate::membership::membership_repository::WorkerRepository;
use crate::project::project_models::Project;
use crate::task::task_models::Task;
use crate::user::user_repository::UserRepository;
use tokio::sync::broadcast;
use uuid::Uuid;

/// An assignment change warrants a notification only when a new assignee
/// was actually set, differs from the previous one, and is not the actor
/// assigning themselves.
pub fn assignment_should_notify(
    new_assignee: Option<Uuid>,
    previous_assignee: Option<Uuid>,
    actor_id: Uuid,
) -> Option<Uuid> {
    let assignee = new_assignee?;

    if Some(assignee) == previous_assignee || assignee == actor_id {
        return None;
    }

    Some(assignee)
}

/// Everyone acting for the company except the user who triggered the
/// event.
pub fn completion_recipients(member_ids: &[Uuid], actor_id: Uuid) -> Vec<Uuid> {
    member_ids
        .iter()
        .copied()
        .filter(|id| *id != actor_id)
        .collect()
}

/// Fans lifecycle events out to the affected users. Delivery is a
/// best-effort side channel: the triggering mutation has already been
/// persisted when dispatch runs, so failures are logged and swallowed,
/// never propagated.
#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    workers: WorkerRepository,
    users: UserRepository,
    tx: broadcast::Sender<Notification>,
}

impl NotificationService {
    pub fn new(
        repo: NotificationRepository,
        workers: WorkerRepository,
        users: UserRepository,
        tx: broadcast::Sender<Notification>,
    ) -> Self {
        Self {
            repo,
            workers,
            users,
            tx,
        }
    }

    pub fn notify_task_assigned(
        &self,
        task: &Task,
        project: &Project,
        assigner_id: Uuid,
        assignee_id: Uuid,
    ) {
        let service = self.clone();
        let task = task.clone();
        let project = project.clone();

        tokio::spawn(async move {
            if let Err(e) = service
                .send_task_assigned(&task, &project, assigner_id, assignee_id)
                .await
            {
                tracing::warn!("Failed to deliver assignment notification: {:?}", e);
            }
        });
    }

    pub fn notify_task_completed(&self, task: &Task, project: &Project, actor_id: Uuid) {
        let service = self.clone();
        let task = task.clone();
        let project = project.clone();

        tokio::spawn(async move {
            if let Err(e) = service.send_task_completed(&task, &project, actor_id).await {
                tracing::warn!("Failed to deliver completion notifications: {:?}", e);
            }
        });
    }

    async fn send_task_assigned(
        &self,
        task: &Task,
        project: &Project,
        assigner_id: Uuid,
        assignee_id: Uuid,
    ) -> Result<()> {
        let assigner_name = self.username_of(assigner_id).await?;

        let message = format!(
            "{} assigned you \"{}\" in {}",
            assigner_name, task.title, project.name
        );
        let data = serde_json::json!({
            "task_id": task.id,
            "project_id": project.id,
            "company_id": project.company_id,
        });

        let notification = self
            .repo
            .create(assignee_id, TASK_ASSIGNED, "New task assignment", &message, data)
            .await?;

        // SSE push; a lagging or absent subscriber is not an error.
        let _ = self.tx.send(notification);

        Ok(())
    }

    async fn send_task_completed(&self, task: &Task, project: &Project, actor_id: Uuid) -> Result<()> {
        let completer_id = task.assigned_to_id.unwrap_or(actor_id);
        let completer_name = self.username_of(completer_id).await?;

        let member_ids = self
            .workers
            .find_active_member_ids(project.company_id)
            .await?;

        let message = format!(
            "{} completed \"{}\" in {}",
            completer_name, task.title, project.name
        );
        let data = serde_json::json!({
            "task_id": task.id,
            "project_id": project.id,
            "company_id": project.company_id,
        });

        for recipient in completion_recipients(&member_ids, actor_id) {
            let notification = self
                .repo
                .create(recipient, TASK_COMPLETED, "Task completed", &message, data.clone())
                .await?;

            let _ = self.tx.send(notification);
        }

        Ok(())
    }

    async fn username_of(&self, user_id: Uuid) -> Result<String> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| "Someone".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_notification_without_an_assignee() {
        assert_eq!(assignment_should_notify(None, None, Uuid::new_v4()), None);
    }

    #[test]
    fn no_notification_when_assignee_is_unchanged() {
        let assignee = Uuid::new_v4();
        assert_eq!(
            assignment_should_notify(Some(assignee), Some(assignee), Uuid::new_v4()),
            None
        );
    }

    #[test]
    fn no_notification_for_self_assignment() {
        let actor = Uuid::new_v4();
        assert_eq!(assignment_should_notify(Some(actor), None, actor), None);
    }

    #[test]
    fn new_assignee_is_notified() {
        let assignee = Uuid::new_v4();
        let previous = Uuid::new_v4();

        assert_eq!(
            assignment_should_notify(Some(assignee), Some(previous), Uuid::new_v4()),
            Some(assignee)
        );
        assert_eq!(
            assignment_should_notify(Some(assignee), None, Uuid::new_v4()),
            Some(assignee)
        );
    }

    #[test]
    fn completion_fan_out_excludes_the_actor() {
        let actor = Uuid::new_v4();
        let others = [Uuid::new_v4(), Uuid::new_v4()];
        let members = vec![others[0], actor, others[1]];

        let recipients = completion_recipients(&members, actor);
        assert_eq!(recipients, others);
    }

    #[test]
    fn completion_fan_out_can_be_empty() {
        let actor = Uuid::new_v4();
        assert!(completion_recipients(&[actor], actor).is_empty());
    }
}
