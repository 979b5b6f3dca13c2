//! Create `phrase` table with FK to `account`.
//!
//! Deleting an account removes its phrases (ON DELETE CASCADE).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phrase::Table)
                    .if_not_exists()
                    .col(uuid(Phrase::Id).primary_key())
                    .col(uuid(Phrase::AccountId).not_null())
                    .col(string_len(Phrase::Key, 255).not_null())
                    .col(text(Phrase::Value).not_null())
                    .col(timestamp_with_time_zone(Phrase::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phrase_account")
                            .from(Phrase::Table, Phrase::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One key per account; concurrent inserts of the same key race on this index
        manager
            .create_index(
                Index::create()
                    .name("uniq_phrase_account_key")
                    .table(Phrase::Table)
                    .col(Phrase::AccountId)
                    .col(Phrase::Key)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Phrase::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Phrase { Table, Id, AccountId, Key, Value, CreatedAt }

#[derive(DeriveIden)]
enum Account { Table, Id }
