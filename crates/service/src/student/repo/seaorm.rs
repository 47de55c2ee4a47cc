use models::student::{self, Entity as StudentEntity, Model, NewStudent, StudentStatus};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::errors::ServiceError;
use crate::student::convert;
use crate::student::repository::StudentRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

/// The only unique column besides the primary key is `email`.
fn write_err(e: DbErr, email: &str) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::duplicate_email(email),
        _ => db_err(e),
    }
}

/// `%term%` with LIKE wildcards in `term` matched literally.
fn contains_literal(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '!') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('!')
}

async fn exists<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, DbErr> {
    Ok(StudentEntity::find_by_id(id).count(conn).await? > 0)
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
        StudentEntity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Model>, ServiceError> {
        StudentEntity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Model>, ServiceError> {
        StudentEntity::find()
            .filter(student::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_student_id(&self, student_id: &str) -> Result<Vec<Model>, ServiceError> {
        StudentEntity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_status(&self, status: StudentStatus) -> Result<Vec<Model>, ServiceError> {
        StudentEntity::find()
            .filter(student::Column::Status.eq(status))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Model>, ServiceError> {
        StudentEntity::find()
            .filter(
                Condition::any()
                    .add(student::Column::FirstName.like(contains_literal(term)))
                    .add(student::Column::LastName.like(contains_literal(term))),
            )
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn insert(&self, new: NewStudent) -> Result<Model, ServiceError> {
        let email = new.email.clone();
        convert::to_entity(new).insert(&self.db).await.map_err(|e| write_err(e, &email))
    }

    async fn replace(&self, id: i64, new: NewStudent) -> Result<Option<Model>, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        // Dropping `txn` without commit rolls back.
        let Some(existing) = StudentEntity::find_by_id(id).one(&txn).await.map_err(db_err)? else {
            return Ok(None);
        };
        let email = new.email.clone();
        let mut am: student::ActiveModel = existing.into();
        convert::overwrite(&mut am, new);
        let updated = am.update(&txn).await.map_err(|e| write_err(e, &email))?;
        txn.commit().await.map_err(db_err)?;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        if !exists(&txn, id).await.map_err(db_err)? {
            return Ok(false);
        }
        let res = StudentEntity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        exists(&self.db, id).await.map_err(db_err)
    }
}
