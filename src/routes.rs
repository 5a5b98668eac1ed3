use crate::{
    auth::auth_handlers,
    company::company_handlers,
    membership::membership_handlers,
    middleware::auth_middleware,
    notification::notification_handlers,
    project::project_handlers,
    state::AppState,
    task::task_handlers,
};
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        company_handlers::create_company,
        company_handlers::get_companies,
        membership_handlers::invite_worker,
        membership_handlers::accept_invitation,
        project_handlers::create_project,
        project_handlers::delete_project,
        task_handlers::create_task,
        task_handlers::get_tasks,
        task_handlers::update_task_status,
        notification_handlers::get_notifications,
        notification_handlers::notification_stream,
        notification_handlers::mark_notification_read,
        notification_handlers::delete_notification,
    ),
    components(
        schemas(
            crate::auth::auth_dto::RegisterRequest,
            crate::auth::auth_dto::LoginRequest,
            crate::auth::auth_dto::AuthResponse,
            crate::user::user_models::UserResponse,
            crate::company::company_dto::CreateCompanyRequest,
            crate::company::company_dto::UpdateCompanyRequest,
            crate::company::company_models::Company,
            crate::company::company_models::CompanyResponse,
            crate::membership::membership_dto::InviteWorkerRequest,
            crate::membership::membership_dto::UpdateWorkerRequest,
            crate::membership::membership_models::Capabilities,
            crate::membership::membership_models::Worker,
            crate::membership::membership_models::WorkerStatus,
            crate::membership::membership_models::WorkerWithUser,
            crate::membership::membership_models::InvitationWithCompany,
            crate::project::project_dto::CreateProjectRequest,
            crate::project::project_dto::UpdateProjectRequest,
            crate::project::project_models::Project,
            crate::project::project_models::ProjectResponse,
            crate::project::project_models::ProjectStats,
            crate::project::project_models::ProjectStatus,
            crate::project::project_models::ProjectPriority,
            crate::task::task_dto::CreateTaskRequest,
            crate::task::task_dto::UpdateTaskRequest,
            crate::task::task_dto::UpdateTaskStatusRequest,
            crate::task::task_models::Task,
            crate::task::task_models::TaskStatus,
            crate::task::task_models::TaskPriority,
            crate::notification::notification_models::Notification,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "companies", description = "Company management endpoints"),
        (name = "workers", description = "Worker membership endpoints"),
        (name = "projects", description = "Project management endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "notifications", description = "Notification endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    // Protected routes (auth required)
    let me_routes = Router::new()
        .route("/me", get(auth_handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let company_routes = Router::new()
        .route(
            "/",
            get(company_handlers::get_companies).post(company_handlers::create_company),
        )
        .route(
            "/:id",
            get(company_handlers::get_company)
                .put(company_handlers::update_company)
                .delete(company_handlers::delete_company),
        )
        .route(
            "/:id/workers",
            get(membership_handlers::get_workers).post(membership_handlers::invite_worker),
        )
        .route(
            "/:id/workers/:worker_id",
            patch(membership_handlers::update_worker),
        )
        .route("/:id/projects", get(project_handlers::get_projects))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let invitation_routes = Router::new()
        .route("/", get(membership_handlers::get_invitations))
        .route("/:id/accept", post(membership_handlers::accept_invitation))
        .route(
            "/:id/decline",
            post(membership_handlers::decline_invitation),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let project_routes = Router::new()
        .route("/", post(project_handlers::create_project))
        .route(
            "/:id",
            get(project_handlers::get_project)
                .put(project_handlers::update_project)
                .delete(project_handlers::delete_project),
        )
        .route("/:id/tasks", get(task_handlers::get_tasks))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let task_routes = Router::new()
        .route("/", post(task_handlers::create_task))
        .route(
            "/:id",
            get(task_handlers::get_task)
                .put(task_handlers::update_task)
                .delete(task_handlers::delete_task),
        )
        .route("/:id/status", patch(task_handlers::update_task_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route("/", get(notification_handlers::get_notifications))
        .route("/stream", get(notification_handlers::notification_stream))
        .route(
            "/:id/read",
            patch(notification_handlers::mark_notification_read),
        )
        .route("/:id", delete(notification_handlers::delete_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes.merge(me_routes))
        .nest("/companies", company_routes)
        .nest("/invitations", invitation_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/notifications", notification_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}
