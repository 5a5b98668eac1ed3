pub mod membership_dto;
pub mod membership_handlers;
pub mod membership_models;
pub mod membership_repository;
pub mod membership_service;

pub use membership_models::{resolve_role, Capabilities, Role, Worker, WorkerStatus};
pub use membership_repository::WorkerRepository;
pub use membership_service::MembershipService;
