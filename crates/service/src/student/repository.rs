use async_trait::async_trait;
use models::student::{Model, NewStudent, StudentStatus};

use crate::errors::ServiceError;

/// Data-access abstraction over the student store.
///
/// `replace` and `delete_by_id` report a missing row as `Ok(None)` / `Ok(false)`;
/// deciding that this is an error is the service's job.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Model>, ServiceError>;
    async fn find_by_student_id(&self, student_id: &str) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_status(&self, status: StudentStatus) -> Result<Vec<Model>, ServiceError>;
    /// Students whose first or last name contains `term`, case-sensitive.
    /// `%` and `_` in `term` are ordinary characters, not wildcards.
    async fn search_by_name(&self, term: &str) -> Result<Vec<Model>, ServiceError>;
    async fn insert(&self, new: NewStudent) -> Result<Model, ServiceError>;
    /// Overwrite every mutable field of `id` in one transaction.
    async fn replace(&self, id: i64, new: NewStudent) -> Result<Option<Model>, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i64, Model>,
        last_id: i64,
    }

    /// Mirrors the relational store: ids count up from 1 and emails are unique.
    #[derive(Default)]
    pub struct MockStudentRepository {
        rows: Mutex<Rows>,
        unavailable: bool,
    }

    impl MockStudentRepository {
        /// A repository whose every call fails as if the database were down.
        pub fn unavailable() -> Self {
            Self { unavailable: true, ..Default::default() }
        }

        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            if self.unavailable {
                return Err(ServiceError::Db("connection refused".into()));
            }
            self.rows.lock().map_err(|_| ServiceError::Db("mock repository lock poisoned".into()))
        }

        fn collect(&self, pred: impl Fn(&Model) -> bool) -> Result<Vec<Model>, ServiceError> {
            Ok(self.rows()?.by_id.values().filter(|m| pred(m)).cloned().collect())
        }
    }

    fn email_taken(rows: &Rows, email: &str, except: Option<i64>) -> bool {
        rows.by_id.values().any(|m| m.email == email && Some(m.id) != except)
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
            self.collect(|_| true)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Model>, ServiceError> {
            Ok(self.rows()?.by_id.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Model>, ServiceError> {
            Ok(self.rows()?.by_id.values().find(|m| m.email == email).cloned())
        }

        async fn find_by_student_id(&self, student_id: &str) -> Result<Vec<Model>, ServiceError> {
            self.collect(|m| m.student_id == student_id)
        }

        async fn find_by_status(&self, status: StudentStatus) -> Result<Vec<Model>, ServiceError> {
            self.collect(|m| m.status == status)
        }

        async fn search_by_name(&self, term: &str) -> Result<Vec<Model>, ServiceError> {
            self.collect(|m| m.first_name.contains(term) || m.last_name.contains(term))
        }

        async fn insert(&self, new: NewStudent) -> Result<Model, ServiceError> {
            let mut rows = self.rows()?;
            if email_taken(&rows, &new.email, None) {
                return Err(ServiceError::duplicate_email(&new.email));
            }
            rows.last_id += 1;
            let m = new.with_id(rows.last_id);
            rows.by_id.insert(m.id, m.clone());
            Ok(m)
        }

        async fn replace(&self, id: i64, new: NewStudent) -> Result<Option<Model>, ServiceError> {
            let mut rows = self.rows()?;
            if !rows.by_id.contains_key(&id) {
                return Ok(None);
            }
            if email_taken(&rows, &new.email, Some(id)) {
                return Err(ServiceError::duplicate_email(&new.email));
            }
            let m = new.with_id(id);
            rows.by_id.insert(id, m.clone());
            Ok(Some(m))
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.by_id.remove(&id).is_some())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.by_id.contains_key(&id))
        }
    }
}
