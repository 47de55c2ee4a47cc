use std::sync::Arc;

use models::student::{NewStudent, StudentStatus};
use tracing::{info, instrument};

use super::convert::to_record;
use super::domain::StudentDto;
use super::repository::StudentRepository;
use super::validation::ValidationErrors;
use crate::errors::ServiceError;

/// Student business service independent of web framework.
///
/// Inputs to `create`/`update` are already-validated [`NewStudent`]s, so an
/// invalid payload can never reach the store through this type.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every stored student, in store order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<StudentDto>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<StudentDto, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(to_record)
            .ok_or_else(|| ServiceError::student_not_found(id))
    }

    /// Persist a new student; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use chrono::NaiveDate;
    /// use models::student::{NewStudent, StudentStatus};
    /// use service::student::{StudentService, repository::mock::MockStudentRepository};
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let new = NewStudent {
    ///     first_name: "John".into(),
    ///     last_name: "Doe".into(),
    ///     email: "john.doe@example.com".into(),
    ///     date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    ///     status: StudentStatus::Active,
    ///     student_id: "ST123456".into(),
    /// };
    /// let created = tokio_test::block_on(svc.create(new)).unwrap();
    /// assert_eq!(created.id, Some(1));
    /// assert_eq!(created.email.as_deref(), Some("john.doe@example.com"));
    /// ```
    #[instrument(skip(self, new), fields(email = %new.email))]
    pub async fn create(&self, new: NewStudent) -> Result<StudentDto, ServiceError> {
        let saved = self.repo.insert(new).await?;
        info!(student_id = saved.id, "student_created");
        Ok(to_record(saved))
    }

    /// Full replace of every mutable field. Fields are not merged: whatever the
    /// caller sent becomes the stored value.
    #[instrument(skip(self, new))]
    pub async fn update(&self, id: i64, new: NewStudent) -> Result<StudentDto, ServiceError> {
        let updated = self
            .repo
            .replace(id, new)
            .await?
            .ok_or_else(|| ServiceError::student_not_found(id))?;
        info!(student_id = id, "student_updated");
        Ok(to_record(updated))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::student_not_found(id));
        }
        info!(student_id = id, "student_deleted");
        Ok(())
    }

    #[instrument(skip(self, email))]
    pub async fn find_by_email(&self, email: &str) -> Result<StudentDto, ServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .map(to_record)
            .ok_or_else(|| ServiceError::student_not_found_by_email(email))
    }

    /// All students carrying `student_id`; it is not unique, so this may return several.
    #[instrument(skip(self))]
    pub async fn find_by_student_id(&self, student_id: &str) -> Result<Vec<StudentDto>, ServiceError> {
        let rows = self.repo.find_by_student_id(student_id).await?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: StudentStatus) -> Result<Vec<StudentDto>, ServiceError> {
        let rows = self.repo.find_by_status(status).await?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    #[instrument(skip(self))]
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<StudentDto>, ServiceError> {
        if term.trim().is_empty() {
            let mut errors = ValidationErrors::default();
            errors.add("name", "Search term is required");
            return Err(errors.into());
        }
        let rows = self.repo.search_by_name(term).await?;
        Ok(rows.into_iter().map(to_record).collect())
    }
}
