pub mod project_dto;
pub mod project_handlers;
pub mod project_models;
pub mod project_repository;
pub mod project_service;

pub use project_models::{Project, ProjectResponse, ProjectStatus};
pub use project_repository::ProjectRepository;
pub use project_service::ProjectService;
