//! Create `account` table.
//!
//! `handle` carries the unique constraint that makes registration atomic.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Handle, 64).unique_key().not_null())
                    .col(string_len(Account::DisplayName, 128).not_null())
                    .col(string_len(Account::CredentialHash, 255).not_null())
                    .col(string_len(Account::CredentialAlgorithm, 64).not_null())
                    .col(timestamp_with_time_zone(Account::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account { Table, Id, Handle, DisplayName, CredentialHash, CredentialAlgorithm, CreatedAt }
