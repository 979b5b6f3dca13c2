use async_trait::async_trait;

use super::domain::{AccountId, AccountRecord, NewAccount};
use crate::errors::RegistryError;

/// Persistence seam for accounts.
///
/// `insert_account` must check handle uniqueness and write in one atomic
/// step, returning `RegistryError::Conflict` when the handle is taken.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn insert_account(&self, account: NewAccount) -> Result<AccountRecord, RegistryError>;
    async fn find_account_by_handle(&self, handle: &str) -> Result<Option<AccountRecord>, RegistryError>;
    async fn find_account(&self, id: AccountId) -> Result<Option<AccountRecord>, RegistryError>;
    /// Oldest first.
    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, RegistryError>;
    /// Removes every account and, with them, every phrase. Returns the account count.
    async fn delete_all_accounts(&self) -> Result<u64, RegistryError>;
}
