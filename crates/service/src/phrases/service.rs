use std::sync::Arc;

use models::phrase;
use tracing::{debug, info, instrument};

use super::domain::{EntryId, Phrase, PhraseInput};
use super::repository::PhraseRepository;
use crate::accounts::domain::AccountId;
use crate::errors::RegistryError;

/// Per-account phrase collection.
///
/// Callers pass an account id they have already tied to the requester; no
/// ownership check happens here.
pub struct PhraseRegistry<R: PhraseRepository + ?Sized = dyn PhraseRepository> {
    repo: Arc<R>,
}

impl<R: PhraseRepository + ?Sized> PhraseRegistry<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Add a phrase. An existing key is never overwritten: the call fails
    /// with `Conflict` instead.
    #[instrument(skip(self, input), fields(account_id = %account_id, key = %input.key))]
    pub async fn insert(&self, account_id: AccountId, input: PhraseInput) -> Result<EntryId, RegistryError> {
        phrase::validate_key(&input.key)?;
        phrase::validate_value(&input.value)?;
        let entry_id = self.repo.insert_phrase(account_id, &input.key, &input.value).await?;
        info!(%entry_id, "phrase_inserted");
        Ok(entry_id)
    }

    /// Phrases of an account in insertion order.
    ///
    /// An unknown account is `NotFound`; a known account without phrases
    /// yields an empty list.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::phrases::{PhraseRegistry, domain::{Phrase, PhraseInput}};
    /// use service::repo::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let account = store.seed_account("ana");
    /// let registry = PhraseRegistry::new(store);
    /// let input = PhraseInput { key: "greeting".into(), value: "oi".into() };
    /// tokio_test::block_on(registry.insert(account, input)).unwrap();
    /// let listed = tokio_test::block_on(registry.list(account)).unwrap();
    /// assert_eq!(listed, vec![Phrase { key: "greeting".into(), value: "oi".into() }]);
    /// ```
    pub async fn list(&self, account_id: AccountId) -> Result<Vec<Phrase>, RegistryError> {
        if !self.repo.account_exists(account_id).await? {
            return Err(RegistryError::not_found("account"));
        }
        let phrases = self.repo.list_phrases(account_id).await?;
        debug!(%account_id, count = phrases.len(), "phrases_listed");
        Ok(phrases)
    }

    /// Remove one phrase; a second removal of the same key is `NotFound`.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn remove(&self, account_id: AccountId, key: &str) -> Result<(), RegistryError> {
        if !self.repo.delete_phrase(account_id, key).await? {
            return Err(RegistryError::not_found("phrase"));
        }
        info!(key, "phrase_removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, PhraseRegistry) {
        let store = Arc::new(MemoryStore::default());
        let repo: Arc<dyn PhraseRepository> = store.clone();
        (store, PhraseRegistry::new(repo))
    }

    fn input(key: &str, value: &str) -> PhraseInput {
        PhraseInput { key: key.into(), value: value.into() }
    }

    fn pair(key: &str, value: &str) -> Phrase {
        Phrase { key: key.into(), value: value.into() }
    }

    #[tokio::test]
    async fn insert_list_remove_round_trip() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");

        reg.insert(a, input("k", "v")).await.unwrap();
        assert!(reg.list(a).await.unwrap().contains(&pair("k", "v")));

        reg.remove(a, "k").await.unwrap();
        assert!(!reg.list(a).await.unwrap().contains(&pair("k", "v")));
    }

    #[tokio::test]
    async fn duplicate_key_is_rejected_not_overwritten() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        reg.insert(a, input("greeting", "oi")).await.unwrap();
        let err = reg.insert(a, input("greeting", "ola")).await.unwrap_err();
        assert!(matches!(err, RegistryError::Conflict(_)));
        assert_eq!(reg.list(a).await.unwrap(), vec![pair("greeting", "oi")]);
    }

    #[tokio::test]
    async fn keys_are_scoped_per_account() {
        let (store, reg) = setup();
        let a = store.seed_account("a");
        let b = store.seed_account("b");
        reg.insert(a, input("shared", "from a")).await.unwrap();
        reg.insert(b, input("shared", "from b")).await.unwrap();
        assert_eq!(reg.list(a).await.unwrap(), vec![pair("shared", "from a")]);
        assert_eq!(reg.list(b).await.unwrap(), vec![pair("shared", "from b")]);
    }

    #[tokio::test]
    async fn remove_twice_is_not_found() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        reg.insert(a, input("k", "v")).await.unwrap();
        reg.remove(a, "k").await.unwrap();
        assert!(matches!(reg.remove(a, "k").await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_of_unknown_account_is_not_found() {
        let (_store, reg) = setup();
        assert!(matches!(reg.list(uuid::Uuid::new_v4()).await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_of_account_without_phrases_is_empty() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        assert!(reg.list(a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_for_unknown_account_is_not_found() {
        let (_store, reg) = setup();
        let err = reg.insert(uuid::Uuid::new_v4(), input("k", "v")).await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_key_is_invalid() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        assert!(matches!(reg.insert(a, input(" ", "v")).await, Err(RegistryError::Validation(_))));
    }

    #[tokio::test]
    async fn nul_in_key_or_value_is_invalid() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        assert!(matches!(reg.insert(a, input("a\u{0}b", "v")).await, Err(RegistryError::Validation(_))));
        assert!(matches!(reg.insert(a, input("k", "v\u{0}")).await, Err(RegistryError::Validation(_))));
        assert!(reg.list(a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        for k in ["z", "m", "a"] {
            reg.insert(a, input(k, k)).await.unwrap();
        }
        let keys: Vec<_> = reg.list(a).await.unwrap().into_iter().map(|p| p.key).collect();
        assert_eq!(keys, ["z", "m", "a"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_insert_of_same_key_has_one_winner() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        let reg = Arc::new(reg);
        let barrier = Arc::new(tokio::sync::Barrier::new(16));
        let mut tasks = Vec::new();
        for i in 0..16 {
            let reg = Arc::clone(&reg);
            let barrier = Arc::clone(&barrier);
            tasks.push(tokio::spawn(async move {
                barrier.wait().await;
                reg.insert(a, input("contended", &format!("v{i}"))).await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for t in tasks {
            match t.await.unwrap() {
                Ok(_) => ok += 1,
                Err(RegistryError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!((ok, conflicts), (1, 15));
        assert_eq!(reg.list(a).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_remove_has_one_winner() {
        let (store, reg) = setup();
        let a = store.seed_account("ana");
        reg.insert(a, input("k", "v")).await.unwrap();
        let reg = Arc::new(reg);
        let (r1, r2) = tokio::join!(
            { let reg = Arc::clone(&reg); async move { reg.remove(a, "k").await } },
            { let reg = Arc::clone(&reg); async move { reg.remove(a, "k").await } },
        );
        let outcomes = [r1.is_ok(), r2.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    }
}
