use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::accounts::domain::{AccountId, AccountRecord, NewAccount};
use crate::accounts::repository::AccountRepository;
use crate::errors::RegistryError;
use crate::phrases::domain::{EntryId, Phrase};
use crate::phrases::repository::PhraseRepository;

#[derive(Debug)]
struct PhraseRow {
    account_id: AccountId,
    key: String,
    value: String,
}

#[derive(Default)]
struct MemoryState {
    accounts: Vec<AccountRecord>,
    phrases: Vec<PhraseRow>,
}

/// In-process store for tests, doc examples and `store.backend = "memory"`.
///
/// All state sits behind one mutex, so every check-then-write happens in a
/// single critical section. Vectors keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, RegistryError> {
        self.state.lock().map_err(|_| RegistryError::Store("memory store lock poisoned".into()))
    }

    /// Insert an account directly, bypassing registration and hashing.
    ///
    /// The stored hash is not a valid PHC string, so the account can never
    /// authenticate.
    pub fn seed_account(&self, handle: &str) -> AccountId {
        let id = Uuid::new_v4();
        let record = AccountRecord {
            id,
            handle: handle.to_string(),
            display_name: handle.to_string(),
            credential_hash: String::new(),
            credential_algorithm: "none".into(),
        };
        match self.state.lock() {
            Ok(mut s) => s.accounts.push(record),
            Err(poisoned) => poisoned.into_inner().accounts.push(record),
        }
        id
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn insert_account(&self, account: NewAccount) -> Result<AccountRecord, RegistryError> {
        let mut s = self.lock()?;
        if s.accounts.iter().any(|a| a.handle == account.handle) {
            return Err(RegistryError::conflict("handle"));
        }
        let record = AccountRecord {
            id: Uuid::new_v4(),
            handle: account.handle,
            display_name: account.display_name,
            credential_hash: account.credential_hash,
            credential_algorithm: account.credential_algorithm,
        };
        s.accounts.push(record.clone());
        Ok(record)
    }

    async fn find_account_by_handle(&self, handle: &str) -> Result<Option<AccountRecord>, RegistryError> {
        Ok(self.lock()?.accounts.iter().find(|a| a.handle == handle).cloned())
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<AccountRecord>, RegistryError> {
        Ok(self.lock()?.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, RegistryError> {
        Ok(self.lock()?.accounts.clone())
    }

    async fn delete_all_accounts(&self) -> Result<u64, RegistryError> {
        let mut s = self.lock()?;
        let count = s.accounts.len() as u64;
        s.accounts.clear();
        s.phrases.clear();
        Ok(count)
    }
}

#[async_trait]
impl PhraseRepository for MemoryStore {
    async fn insert_phrase(&self, account_id: AccountId, key: &str, value: &str) -> Result<EntryId, RegistryError> {
        let mut s = self.lock()?;
        if !s.accounts.iter().any(|a| a.id == account_id) {
            return Err(RegistryError::not_found("account"));
        }
        if s.phrases.iter().any(|p| p.account_id == account_id && p.key == key) {
            return Err(RegistryError::conflict("phrase key"));
        }
        s.phrases.push(PhraseRow { account_id, key: key.to_string(), value: value.to_string() });
        Ok(Uuid::new_v4())
    }

    async fn account_exists(&self, account_id: AccountId) -> Result<bool, RegistryError> {
        Ok(self.lock()?.accounts.iter().any(|a| a.id == account_id))
    }

    async fn list_phrases(&self, account_id: AccountId) -> Result<Vec<Phrase>, RegistryError> {
        let s = self.lock()?;
        Ok(s.phrases
            .iter()
            .filter(|p| p.account_id == account_id)
            .map(|p| Phrase { key: p.key.clone(), value: p.value.clone() })
            .collect())
    }

    async fn delete_phrase(&self, account_id: AccountId, key: &str) -> Result<bool, RegistryError> {
        let mut s = self.lock()?;
        let before = s.phrases.len();
        s.phrases.retain(|p| !(p.account_id == account_id && p.key == key));
        Ok(s.phrases.len() < before)
    }
}
