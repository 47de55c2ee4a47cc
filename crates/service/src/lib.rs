//! Service layer for the student registry.
//! - Separates business logic from data access.
//! - Validation and DTO conversion live next to the service that relies on them.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod student;
#[cfg(test)]
pub mod test_support;
