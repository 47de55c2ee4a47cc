//! Student module: DTO, validation, conversion, repository and service.

pub mod convert;
pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;
pub mod validation;

pub use domain::StudentDto;
pub use service::StudentService;
