//! Persistence models for the student registry.
pub mod db;
pub mod student;
