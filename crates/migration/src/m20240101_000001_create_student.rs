//! Create `student` table.
//!
//! `id` is the surrogate key; `student_id` is the unique business key.
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
                    .col(pk_auto(Student::Id))
                    .col(string_len(Student::StudentId, 64).not_null())
                    .col(string_len(Student::FirstName, 128).not_null())
                    .col(string_len(Student::LastName, 128).not_null())
                    .col(string_len(Student::EmailAddress, 256).not_null())
                    .col(integer(Student::YearLevel).not_null())
                    .col(string_len(Student::Password, 256).not_null())
                    .col(timestamp_with_time_zone(Student::DateStamp).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_student_id_unique")
                    .table(Student::Table)
                    .col(Student::StudentId)
                    .unique()
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
    Table,
    Id,
    StudentId,
    FirstName,
    LastName,
    EmailAddress,
    YearLevel,
    Password,
    DateStamp,
}
