use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Students: lookup by student_id (not unique)
        manager
            .create_index(
                Index::create()
                    .name("idx_students_student_id")
                    .table(Student::Table)
                    .col(Student::StudentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Students: filter by status
        manager
            .create_index(
                Index::create()
                    .name("idx_students_status")
                    .table(Student::Table)
                    .col(Student::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_students_status").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_students_student_id").table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student {
    #[sea_orm(iden = "students")]
    Table,
    Status,
    StudentId,
}
