use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::error;

use crate::accounts::domain::{AccountId, AccountRecord, NewAccount};
use crate::accounts::repository::AccountRepository;
use crate::errors::RegistryError;
use crate::phrases::domain::{EntryId, Phrase};
use crate::phrases::repository::PhraseRepository;
use models::errors::ModelError;

/// Postgres-backed store.
///
/// Uniqueness and account existence are left to the schema's unique indexes
/// and foreign key; violations come back classified by `ModelError::from_write`.
#[derive(Clone)]
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_err(op: &'static str) -> impl Fn(ModelError) -> RegistryError {
    move |e| {
        if let ModelError::Db(msg) = &e {
            error!(op, error = %msg, "store_failure");
        }
        RegistryError::from(e)
    }
}

#[async_trait]
impl AccountRepository for SeaOrmStore {
    async fn insert_account(&self, account: NewAccount) -> Result<AccountRecord, RegistryError> {
        let created = models::account::create(
            &self.db,
            &account.handle,
            &account.display_name,
            account.credential_hash,
            &account.credential_algorithm,
        )
        .await
        .map_err(store_err("insert_account"))?;
        Ok(created.into())
    }

    async fn find_account_by_handle(&self, handle: &str) -> Result<Option<AccountRecord>, RegistryError> {
        let res = models::account::find_by_handle(&self.db, handle)
            .await
            .map_err(store_err("find_account_by_handle"))?;
        Ok(res.map(AccountRecord::from))
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<AccountRecord>, RegistryError> {
        let res = models::account::find_by_id(&self.db, id)
            .await
            .map_err(store_err("find_account"))?;
        Ok(res.map(AccountRecord::from))
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, RegistryError> {
        let rows = models::account::list_all(&self.db)
            .await
            .map_err(store_err("list_accounts"))?;
        Ok(rows.into_iter().map(AccountRecord::from).collect())
    }

    async fn delete_all_accounts(&self) -> Result<u64, RegistryError> {
        models::account::delete_all(&self.db)
            .await
            .map_err(store_err("delete_all_accounts"))
    }
}

#[async_trait]
impl PhraseRepository for SeaOrmStore {
    async fn insert_phrase(&self, account_id: AccountId, key: &str, value: &str) -> Result<EntryId, RegistryError> {
        let row = models::phrase::create(&self.db, account_id, key, value)
            .await
            .map_err(store_err("insert_phrase"))?;
        Ok(row.id)
    }

    async fn account_exists(&self, account_id: AccountId) -> Result<bool, RegistryError> {
        let found = models::account::find_by_id(&self.db, account_id)
            .await
            .map_err(store_err("account_exists"))?;
        Ok(found.is_some())
    }

    async fn list_phrases(&self, account_id: AccountId) -> Result<Vec<Phrase>, RegistryError> {
        let rows = models::phrase::list_for_account(&self.db, account_id)
            .await
            .map_err(store_err("list_phrases"))?;
        Ok(rows.into_iter().map(Phrase::from).collect())
    }

    async fn delete_phrase(&self, account_id: AccountId, key: &str) -> Result<bool, RegistryError> {
        let removed = models::phrase::delete_by_key(&self.db, account_id, key)
            .await
            .map_err(store_err("delete_phrase"))?;
        Ok(removed > 0)
    }
}
