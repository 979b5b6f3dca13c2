use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Account listing is ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_account_created_at")
                    .table(Account::Table)
                    .col(Account::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Phrase listing per account, in insertion order
        manager
            .create_index(
                Index::create()
                    .name("idx_phrase_account_created_at")
                    .table(Phrase::Table)
                    .col(Phrase::AccountId)
                    .col(Phrase::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_account_created_at").table(Account::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_phrase_account_created_at").table(Phrase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Account { Table, CreatedAt }

#[derive(DeriveIden)]
enum Phrase { Table, AccountId, CreatedAt }
