// migrations/m202610180001_create_feedback_writeup.rs
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum AssignfeedbackWriteup {
    Table,
    Id,
    Assignment,
    Grade,
    Commenttext,
    Commentformat,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202610180001_create_feedback_writeup"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AssignfeedbackWriteup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignfeedbackWriteup::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignfeedbackWriteup::Assignment)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignfeedbackWriteup::Grade)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignfeedbackWriteup::Commenttext)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AssignfeedbackWriteup::Commentformat)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignfeedback_writeup_assignment_grade")
                    .table(AssignfeedbackWriteup::Table)
                    .col(AssignfeedbackWriteup::Assignment)
                    .col(AssignfeedbackWriteup::Grade)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignfeedback_writeup_grade")
                    .table(AssignfeedbackWriteup::Table)
                    .col(AssignfeedbackWriteup::Grade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssignfeedbackWriteup::Table).to_owned())
            .await
    }
}
