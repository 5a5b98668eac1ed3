mod auth;
mod company;
mod db;
mod error;
mod membership;
mod middleware;
mod notification;
mod project;
mod routes;
mod state;
mod task;
mod user;

use db::{create_pool, run_migrations};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,buildflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    // Run migrations
    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create notification broadcaster
    let (notification_tx, _) = broadcast::channel(100);

    // Create repositories
    let user_repository = crate::user::user_repository::UserRepository::new(db.clone());
    let company_repository = crate::company::company_repository::CompanyRepository::new(db.clone());
    let worker_repository =
        crate::membership::membership_repository::WorkerRepository::new(db.clone());
    let project_repository = crate::project::project_repository::ProjectRepository::new(db.clone());
    let task_repository = crate::task::task_repository::TaskRepository::new(db.clone());
    let notification_repository =
        crate::notification::notification_repository::NotificationRepository::new(db.clone());

    // Create services
    let auth_service = crate::auth::auth_service::AuthService::new(
        user_repository.clone(),
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    );
    let membership_service = crate::membership::membership_service::MembershipService::new(
        company_repository.clone(),
        worker_repository.clone(),
        user_repository.clone(),
    );
    let notification_service = crate::notification::notification_service::NotificationService::new(
        notification_repository.clone(),
        worker_repository.clone(),
        user_repository.clone(),
        notification_tx.clone(),
    );
    let company_service = crate::company::company_service::CompanyService::new(
        company_repository.clone(),
        membership_service.clone(),
    );
    let project_service = crate::project::project_service::ProjectService::new(
        project_repository.clone(),
        company_repository.clone(),
        membership_service.clone(),
    );
    let task_service = crate::task::task_service::TaskService::new(
        task_repository.clone(),
        project_repository.clone(),
        membership_service.clone(),
        notification_service.clone(),
    );

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        notification_tx: notification_tx.clone(),
        user_repository,
        notification_repository,
        auth_service,
        membership_service,
        company_service,
        project_service,
        task_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
