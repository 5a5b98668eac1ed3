use crate::db::DbPool;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::auth::auth_service::AuthService;
use crate::company::company_service::CompanyService;
use crate::membership::membership_service::MembershipService;
use crate::notification::notification_models::Notification;
use crate::notification::notification_repository::NotificationRepository;
use crate::project::project_service::ProjectService;
use crate::task::task_service::TaskService;
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub notification_tx: broadcast::Sender<Notification>,
    pub user_repository: UserRepository,
    pub notification_repository: NotificationRepository,
    pub auth_service: AuthService,
    pub membership_service: MembershipService,
    pub company_service: CompanyService,
    pub project_service: ProjectService,
    pub task_service: TaskService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
        }
    }
}
