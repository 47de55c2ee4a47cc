//! Create `students` table.
//!
//! `email` carries a unique key; `student_id` deliberately does not.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Student::FirstName, 50).not_null())
                    .col(string_len(Student::LastName, 50).not_null())
                    .col(string_len(Student::Email, 255).unique_key().not_null())
                    .col(date(Student::DateOfBirth).not_null())
                    .col(string_len(Student::Status, 16).not_null())
                    .col(string_len(Student::StudentId, 8).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    Status,
    StudentId,
}
