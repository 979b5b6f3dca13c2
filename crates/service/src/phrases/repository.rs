use async_trait::async_trait;

use super::domain::{EntryId, Phrase};
use crate::accounts::domain::AccountId;
use crate::errors::RegistryError;

/// Persistence seam for phrases.
///
/// `insert_phrase` is a single atomic step: `Conflict` when the key exists
/// for the account, `NotFound` when the account does not exist.
#[async_trait]
pub trait PhraseRepository: Send + Sync {
    async fn insert_phrase(&self, account_id: AccountId, key: &str, value: &str) -> Result<EntryId, RegistryError>;
    async fn account_exists(&self, account_id: AccountId) -> Result<bool, RegistryError>;
    /// Insertion order.
    async fn list_phrases(&self, account_id: AccountId) -> Result<Vec<Phrase>, RegistryError>;
    /// `false` when nothing matched.
    async fn delete_phrase(&self, account_id: AccountId, key: &str) -> Result<bool, RegistryError>;
}
