use thiserror::Error;

use crate::student::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn student_not_found(id: i64) -> Self { Self::NotFound(format!("Student not found with id: {}", id)) }

    pub fn student_not_found_by_email(email: &str) -> Self { Self::NotFound(format!("Student not found with email: {}", email)) }

    pub fn duplicate_email(email: &str) -> Self { Self::Conflict(format!("Student already exists with email: {}", email)) }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self { Self::Validation(errors) }
}
