//! Create `students` table.
//!
//! Single-entity schema: integer identity key, every profile column nullable text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(text_null(Students::Username))
                    .col(text_null(Students::Mail))
                    .col(text_null(Students::PhoneNumber))
                    .col(text_null(Students::Hobby))
                    .col(text_null(Students::Skillsets))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Students::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Students { Table, Id, Username, Mail, PhoneNumber, Hobby, Skillsets }
