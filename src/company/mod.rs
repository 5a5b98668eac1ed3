pub mod company_dto;
pub mod company_handlers;
pub mod company_models;
pub mod company_repository;
pub mod company_service;

pub use company_models::{Company, CompanyResponse};
pub use company_repository::CompanyRepository;
pub use company_service::CompanyService;
